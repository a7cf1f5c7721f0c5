use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::{Error, Result};

pub const BASE_URL: &str = "https://www.fique.co.uk";
pub const LISTING_PATH: &str = "/blogs/news";
pub const ARTICLE_PREFIX: &str = "/blogs/news/";

/// Local output file. The remote blob takes the same name.
pub const OUTPUT_FILE: &str = "fique_articles.jsonl";

pub const CONTAINER_NAME: &str = "blog-data";
pub const CONNECTION_STRING_VAR: &str = "AZURE_CONN_STR";

pub const SELECTOR_TIMEOUT: Duration = Duration::from_millis(8000);

/// Settings for one crawl of the blog listing.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: Url,
    pub listing_url: Url,
    pub article_prefix: String,
    pub output_path: PathBuf,
    pub selector_timeout: Duration,
}

impl ScrapeConfig {
    pub fn new() -> Result<Self> {
        Self::for_site(BASE_URL)
    }

    /// Builds a config for another host that uses the same blog layout.
    pub fn for_site(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let listing_url = base_url.join(LISTING_PATH)?;
        Ok(Self {
            base_url,
            listing_url,
            article_prefix: ARTICLE_PREFIX.to_string(),
            output_path: PathBuf::from(OUTPUT_FILE),
            selector_timeout: SELECTOR_TIMEOUT,
        })
    }

    pub fn with_listing_url(mut self, listing_url: &str) -> Result<Self> {
        self.listing_url = Url::parse(listing_url)?;
        Ok(self)
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_selector_timeout(mut self, timeout: Duration) -> Self {
        self.selector_timeout = timeout;
        self
    }
}

/// Settings for uploading the scrape output.
#[derive(Clone)]
pub struct PublishConfig {
    pub connection_string: String,
    pub container: String,
    pub blob_name: String,
    pub local_file: PathBuf,
}

impl PublishConfig {
    pub fn new(connection_string: impl Into<String>, local_file: impl Into<PathBuf>) -> Result<Self> {
        let local_file = local_file.into();
        Ok(Self {
            connection_string: connection_string.into(),
            container: CONTAINER_NAME.to_string(),
            blob_name: blob_name_for(&local_file)?,
            local_file,
        })
    }

    /// Reads the connection string from `AZURE_CONN_STR`.
    pub fn from_env(local_file: impl Into<PathBuf>) -> Result<Self> {
        let connection_string = env::var(CONNECTION_STRING_VAR)
            .map_err(|_| Error::Config(format!("{} is not set", CONNECTION_STRING_VAR)))?;
        if connection_string.trim().is_empty() {
            return Err(Error::Config(format!("{} is empty", CONNECTION_STRING_VAR)));
        }
        Self::new(connection_string, local_file)
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }
}

// The connection string is a credential; keep it out of debug output.
impl std::fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishConfig")
            .field("container", &self.container)
            .field("blob_name", &self.blob_name)
            .field("local_file", &self.local_file)
            .finish_non_exhaustive()
    }
}

/// The remote blob name is the local file name, so both always agree.
pub fn blob_name_for(local_file: &Path) -> Result<String> {
    local_file
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::Config(format!("No file name in {}", local_file.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scrape_config() {
        let config = ScrapeConfig::new().unwrap();
        assert_eq!(config.listing_url.as_str(), "https://www.fique.co.uk/blogs/news");
        assert_eq!(config.output_path, PathBuf::from(OUTPUT_FILE));
        assert_eq!(config.selector_timeout, Duration::from_millis(8000));
    }

    #[test]
    fn test_invalid_site() {
        assert!(matches!(ScrapeConfig::for_site("not a url"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_blob_name_follows_local_file() {
        let config = PublishConfig::new("UseDevelopmentStorage=true", "out/fique_articles.jsonl").unwrap();
        assert_eq!(config.blob_name, OUTPUT_FILE);
        assert_eq!(config.container, CONTAINER_NAME);
    }

    #[test]
    fn test_debug_hides_connection_string() {
        let config = PublishConfig::new("AccountKey=secret", OUTPUT_FILE).unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_blob_name_requires_file_name() {
        assert!(blob_name_for(Path::new("/")).is_err());
    }
}
