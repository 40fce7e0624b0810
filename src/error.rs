use std::time::Duration;

use thirtyfour::error::WebDriverError;
use thiserror::Error;

use crate::services::Locator;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Timed out after {timeout:?} waiting for {locator} on {url}")]
    PageTimeout {
        locator: Locator,
        url: String,
        timeout: Duration,
    },

    #[error("No element matches {locator}")]
    ElementNotFound { locator: Locator },

    #[error("Expected at least 3 definition entries (transit, ticket, hours), found {found}")]
    MissingDefinitionEntry { found: usize },

    #[error("Label `{label}` has no content element at index {index}")]
    MissingLabelContent { label: String, index: usize },

    #[error("Invalid location name: {0:?}")]
    InvalidLocation(String),

    #[error("Landmark count must be positive")]
    InvalidLandmarkCount,

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
