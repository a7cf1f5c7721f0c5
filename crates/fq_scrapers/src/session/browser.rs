use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use fq_core::{Error, PageSession, Result};
use futures_util::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Headless Chromium driven over CDP, for pages that build their
/// structured data with script.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    current_url: Option<String>,
    closed: bool,
}

impl BrowserSession {
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .build()
            .map_err(|e| Error::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(cdp_error)?;
        let handler = tokio::spawn(async move {
            while handler.next().await.is_some() {}
        });

        let page = browser.new_page("about:blank").await.map_err(cdp_error)?;
        debug!("🧭 Headless browser started");

        Ok(Self {
            browser,
            page,
            handler,
            current_url: None,
            closed: false,
        })
    }
}

fn cdp_error(e: CdpError) -> Error {
    Error::Browser(e.to_string())
}

#[async_trait]
impl PageSession for BrowserSession {
    fn name(&self) -> &str {
        "browser"
    }

    async fn goto(&mut self, url: &str) -> Result<()> {
        self.current_url = None;
        self.page.goto(url).await.map_err(cdp_error)?;
        self.current_url = Some(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        let page = &self.page;
        let attached = tokio::time::timeout(timeout, async {
            while page.find_element(selector).await.is_err() {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await;

        attached.map_err(|_| Error::selector_timeout(self.current_url.clone().unwrap_or_default(), timeout))
    }

    async fn attribute_values(&self, selector: &str, attr: &str) -> Result<Vec<String>> {
        let elements = self.page.find_elements(selector).await.map_err(cdp_error)?;
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(value) = element.attribute(attr).await.map_err(cdp_error)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn inner_texts(&self, selector: &str) -> Result<Vec<String>> {
        let elements = self.page.find_elements(selector).await.map_err(cdp_error)?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.inner_text().await.map_err(cdp_error)?.unwrap_or_default());
        }
        Ok(texts)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.browser.close().await.map(|_| ()).map_err(cdp_error);
        if let Err(e) = self.browser.wait().await {
            warn!("⚠️ Browser process did not exit cleanly: {}", e);
        }
        self.handler.abort();
        result
    }
}
