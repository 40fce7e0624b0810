use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{domain::LocationResult, error::Result};

pub fn output_path(output_dir: &Path, location: &str) -> PathBuf {
    output_dir.join(format!("{}.json", location))
}

/// Writes `<output_dir>/<location>.json`, replacing any earlier run's file.
/// Non-ASCII text is written as-is.
pub async fn persist_location_result(
    output_dir: &Path,
    result: &LocationResult,
) -> Result<PathBuf> {
    let json = serde_json::to_string(&result.landmarks())?;

    if !fs::try_exists(output_dir).await? {
        log::info!("Creating output directory {}", output_dir.display());
    }
    fs::create_dir_all(output_dir).await?;

    let path = output_path(output_dir, &result.location);
    fs::write(&path, json).await?;

    Ok(path)
}

pub async fn load_location_result(path: &Path, location: &str) -> Result<LocationResult> {
    let json = fs::read_to_string(path).await?;
    LocationResult::from_json(location, &json)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::{LandmarkRecord, ADDRESS_KEY, ENGLISH_NAME_KEY};

    fn sample(location: &str, names: &[&str]) -> LocationResult {
        let mut result = LocationResult::new(location);
        for name in names {
            let mut record = LandmarkRecord::new();
            record.insert(ENGLISH_NAME_KEY, "The Forbidden City");
            record.insert(ADDRESS_KEY, format!("北京市东城区{}", name));
            result.insert(*name, record);
        }
        result
    }

    #[tokio::test]
    async fn round_trips_with_order_and_literal_unicode() {
        let dir = TempDir::new().unwrap();
        let result = sample("北京", &["故宫", "天坛", "颐和园"]);

        let path = persist_location_result(dir.path(), &result).await.unwrap();

        assert_eq!(path, dir.path().join("北京.json"));
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("故宫"));
        assert!(!raw.contains("\\u"));

        let loaded = load_location_result(&path, "北京").await.unwrap();
        assert_eq!(loaded, result);
        assert_eq!(
            loaded.names().collect::<Vec<_>>(),
            vec!["故宫", "天坛", "颐和园"]
        );
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("docs").join("city_landmark_info");

        let path = persist_location_result(&nested, &sample("河北", &["山海关"]))
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn rerun_overwrites_instead_of_merging() {
        let dir = TempDir::new().unwrap();
        persist_location_result(dir.path(), &sample("河北", &["山海关", "避暑山庄"]))
            .await
            .unwrap();

        let path = persist_location_result(dir.path(), &sample("河北", &["白洋淀"]))
            .await
            .unwrap();

        let loaded = load_location_result(&path, "河北").await.unwrap();
        assert_eq!(loaded.names().collect::<Vec<_>>(), vec!["白洋淀"]);
    }
}
