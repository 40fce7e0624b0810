use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ScrapeError};

pub const ENGLISH_NAME_KEY: &str = "英文名";
pub const ADDRESS_KEY: &str = "地址";
pub const TRANSIT_KEY: &str = "交通";
pub const TICKET_KEY: &str = "门票";
pub const OPENING_HOURS_KEY: &str = "开放时间";

/// Field name to value, in the order the fields were scraped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkRecord {
    fields: Map<String, Value>,
}

impl LandmarkRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-inserting a key replaces its value but keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), Value::String(value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Every landmark scraped for one location, keyed by Chinese name in visit order.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResult {
    pub location: String,
    landmarks: Vec<(String, LandmarkRecord)>,
}

impl LocationResult {
    pub fn new(location: impl Into<String>) -> Self {
        LocationResult {
            location: location.into(),
            landmarks: vec![],
        }
    }

    /// A repeated name takes the newer record in the earlier slot.
    pub fn insert(&mut self, name: impl Into<String>, record: LandmarkRecord) {
        let name = name.into();
        match self.landmarks.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = record,
            None => self.landmarks.push((name, record)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&LandmarkRecord> {
        self.landmarks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.landmarks.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// The JSON object written to disk: landmark name to record.
    pub fn landmarks(&self) -> Map<String, Value> {
        self.landmarks
            .iter()
            .map(|(name, record)| (name.clone(), Value::Object(record.fields.clone())))
            .collect()
    }

    pub fn from_json(location: impl Into<String>, json: &str) -> Result<Self> {
        let landmarks: Map<String, Value> = serde_json::from_str(json)?;

        let mut result = LocationResult::new(location);
        for (name, record) in landmarks {
            result.insert(name, serde_json::from_value(record)?);
        }
        Ok(result)
    }
}

/// Splits the title block into the Chinese name and, when a second line
/// exists, the English name.
pub fn split_title(text: &str) -> (String, Option<String>) {
    let mut lines = text.split('\n');
    let name = lines.next().unwrap_or_default().to_string();
    let english = lines.next().map(|l| l.to_string());
    (name, english)
}

/// Pairs `labels[i]` with `contents[i + 1]`.
///
/// The first content block on an attraction page is the description and
/// has no label, hence the offset.
pub fn pair_labeled_content(
    labels: Vec<String>,
    contents: &[String],
) -> Result<Vec<(String, String)>> {
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| match contents.get(i + 1) {
            Some(content) => Ok((label, content.clone())),
            None => Err(ScrapeError::MissingLabelContent {
                label,
                index: i + 1,
            }),
        })
        .collect()
}

/// Reads transit, ticket price and opening hours from the first three
/// definition entries, in that order.
pub fn definition_fields(entries: &[String]) -> Result<[(&'static str, String); 3]> {
    match entries {
        [transit, ticket, hours, ..] => Ok([
            (TRANSIT_KEY, transit.clone()),
            (TICKET_KEY, ticket.clone()),
            (OPENING_HOURS_KEY, hours.clone()),
        ]),
        _ => Err(ScrapeError::MissingDefinitionEntry {
            found: entries.len(),
        }),
    }
}
