use std::path::PathBuf;

use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_bool_from_anything, deserialize_number_from_string,
};

use crate::{
    domain::SiteLayout,
    services::{DEFAULT_LANDMARK_COUNT, DEFAULT_POLL_INTERVAL, DEFAULT_TITLE_TIMEOUT},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub browser: BrowserSettings,
    pub crawler: CrawlerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    pub webdriver_url: String,
    #[serde(default, deserialize_with = "deserialize_bool_from_anything")]
    pub headless: bool,
    #[serde(
        default = "default_true",
        deserialize_with = "deserialize_bool_from_anything"
    )]
    pub maximize_window: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    pub home_url: String,
    pub output_dir: PathBuf,
    #[serde(
        default = "default_landmark_count",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub landmark_count: usize,
    #[serde(
        default = "default_title_timeout_secs",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub title_timeout_secs: u64,
    #[serde(
        default = "default_poll_interval_millis",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub poll_interval_millis: u64,
    pub locations: Vec<String>,
    #[serde(default)]
    pub layout: SiteLayout,
}

fn default_true() -> bool {
    true
}

fn default_landmark_count() -> usize {
    DEFAULT_LANDMARK_COUNT
}

fn default_title_timeout_secs() -> u64 {
    DEFAULT_TITLE_TIMEOUT.as_secs()
}

fn default_poll_interval_millis() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    get_configuration_from(base_path.join("configuration"))
}

/// Layers `base.yaml`, the optional `<APP_ENVIRONMENT>.yaml` overlay and
/// `APP_`-prefixed environment variables (`APP_BROWSER__HEADLESS=true`).
pub fn get_configuration_from(
    configuration_directory: PathBuf,
) -> Result<Settings, config::ConfigError> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
