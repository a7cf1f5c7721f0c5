use async_trait::async_trait;
use fq_core::{PageSession, Result};
use std::time::Duration;
use tracing::debug;

use super::{no_page_loaded, LoadedPage};

const USER_AGENT: &str = concat!("fq-scraper/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over plain HTTP and queries them with `scraper`.
///
/// No script runs, so the structured data must be present in the served
/// HTML, which is the case for server-rendered storefront blogs.
pub struct HttpSession {
    client: reqwest::Client,
    page: Option<LoadedPage>,
}

impl HttpSession {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client, page: None }
    }

    fn page(&self) -> Result<&LoadedPage> {
        self.page.as_ref().ok_or_else(no_page_loaded)
    }
}

#[async_trait]
impl PageSession for HttpSession {
    fn name(&self) -> &str {
        "http"
    }

    async fn goto(&mut self, url: &str) -> Result<()> {
        self.page = None;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        debug!("🌐 Loaded {} ({} bytes)", url, html.len());
        self.page = Some(LoadedPage::new(url, html));
        Ok(())
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.page()?.wait_for(selector, timeout)
    }

    async fn attribute_values(&self, selector: &str, attr: &str) -> Result<Vec<String>> {
        self.page()?.attribute_values(selector, attr)
    }

    async fn inner_texts(&self, selector: &str) -> Result<Vec<String>> {
        self.page()?.inner_texts(selector)
    }

    async fn close(&mut self) -> Result<()> {
        self.page = None;
        Ok(())
    }
}
