use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Timed out after {timeout_ms}ms waiting for structured data on {url}")]
    SelectorTimeout { url: String, timeout_ms: u64 },

    #[error("No Article structured data with articleBody on {0}")]
    MissingContent(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Container already exists: {0}")]
    ContainerAlreadyExists(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn selector_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Error::SelectorTimeout {
            url: url.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
