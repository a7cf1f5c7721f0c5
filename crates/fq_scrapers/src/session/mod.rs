use fq_core::{Error, Result};
use scraper::{Html, Selector};
use std::time::Duration;

#[cfg(feature = "browser")]
pub mod browser;
pub mod http;
pub mod memory;

#[cfg(feature = "browser")]
pub use browser::BrowserSession;
pub use http::HttpSession;
pub use memory::MemorySession;

/// A fetched document kept as source text.
///
/// `scraper::Html` is not `Send`, so it is parsed per query and never held
/// across an await point.
#[derive(Debug, Clone)]
pub(crate) struct LoadedPage {
    pub url: String,
    pub html: String,
}

impl LoadedPage {
    pub fn new(url: &str, html: String) -> Self {
        Self {
            url: url.to_string(),
            html,
        }
    }

    pub fn has_match(&self, selector: &str) -> Result<bool> {
        let selector = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        let found = document.select(&selector).next().is_some();
        Ok(found)
    }

    /// A static document cannot gain elements after load, so the wait
    /// resolves immediately either way.
    pub fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()> {
        if self.has_match(selector)? {
            Ok(())
        } else {
            Err(Error::selector_timeout(self.url.as_str(), timeout))
        }
    }

    pub fn attribute_values(&self, selector: &str, attr: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        Ok(document
            .select(&selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::to_string)
            .collect())
    }

    pub fn inner_texts(&self, selector: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        Ok(document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect())
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Scraping(format!("Invalid selector {}: {}", selector, e)))
}

pub(crate) fn no_page_loaded() -> Error {
    Error::Scraping("No page loaded".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head>
            <script type="application/ld+json">{"@type":"Organization"}</script>
        </head><body>
            <a href="/one">One</a>
            <a>No href</a>
            <a href="/two">Two</a>
        </body></html>
    "#;

    #[test]
    fn test_attribute_values_skip_missing() {
        let page = LoadedPage::new("https://example.com", PAGE.to_string());
        assert_eq!(page.attribute_values("a", "href").unwrap(), vec!["/one", "/two"]);
    }

    #[test]
    fn test_inner_texts_of_scripts() {
        let page = LoadedPage::new("https://example.com", PAGE.to_string());
        let texts = page.inner_texts(r#"script[type="application/ld+json"]"#).unwrap();
        assert_eq!(texts, vec![r#"{"@type":"Organization"}"#]);
    }

    #[test]
    fn test_wait_for_missing_selector_times_out() {
        let page = LoadedPage::new("https://example.com", PAGE.to_string());
        assert!(page.wait_for("script", Duration::from_millis(10)).is_ok());
        match page.wait_for("article", Duration::from_millis(8000)) {
            Err(Error::SelectorTimeout { url, timeout_ms }) => {
                assert_eq!(url, "https://example.com");
                assert_eq!(timeout_ms, 8000);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_selector() {
        let page = LoadedPage::new("https://example.com", PAGE.to_string());
        assert!(matches!(page.inner_texts("[[["), Err(Error::Scraping(_))));
    }
}
