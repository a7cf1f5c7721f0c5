use async_trait::async_trait;
use fq_core::{Error, PageSession, Result};
use std::collections::HashMap;
use std::time::Duration;

use super::{no_page_loaded, LoadedPage};

/// Serves pages from a fixed url → HTML map.
#[derive(Debug, Default)]
pub struct MemorySession {
    pages: HashMap<String, String>,
    page: Option<LoadedPage>,
    visited: Vec<String>,
    closed: bool,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Every url passed to `goto`, in call order
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl PageSession for MemorySession {
    fn name(&self) -> &str {
        "memory"
    }

    async fn goto(&mut self, url: &str) -> Result<()> {
        if self.closed {
            return Err(Error::Scraping("Session is closed".to_string()));
        }
        self.visited.push(url.to_string());
        let html = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Scraping(format!("No page for {}", url)))?;
        self.page = Some(LoadedPage::new(url, html));
        Ok(())
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.page.as_ref().ok_or_else(no_page_loaded)?.wait_for(selector, timeout)
    }

    async fn attribute_values(&self, selector: &str, attr: &str) -> Result<Vec<String>> {
        self.page.as_ref().ok_or_else(no_page_loaded)?.attribute_values(selector, attr)
    }

    async fn inner_texts(&self, selector: &str) -> Result<Vec<String>> {
        self.page.as_ref().ok_or_else(no_page_loaded)?.inner_texts(selector)
    }

    async fn close(&mut self) -> Result<()> {
        self.page = None;
        self.closed = true;
        Ok(())
    }
}
