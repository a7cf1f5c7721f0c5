use fq_core::{ArticleRecord, Error, PageSession, Result};
use std::time::Duration;

use super::jsonld::{self, LD_JSON_SELECTOR};

/// Loads one article page and builds its record from the first
/// `Article` structured-data block.
///
/// Fails with `Error::SelectorTimeout` when no structured data shows up in
/// time and `Error::MissingContent` when there is no Article block carrying
/// `articleBody`.
pub async fn extract_article(
    session: &mut dyn PageSession,
    url: &str,
    timeout: Duration,
) -> Result<ArticleRecord> {
    session.goto(url).await?;
    session.wait_for_selector(LD_JSON_SELECTOR, timeout).await?;

    let texts = session.inner_texts(LD_JSON_SELECTOR).await?;
    let blocks = jsonld::parse_blocks(texts.iter().map(String::as_str));

    match jsonld::find_article(blocks) {
        Some(doc) => jsonld::to_record(url, &doc),
        None => Err(Error::MissingContent(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;

    const URL: &str = "https://www.fique.co.uk/blogs/news/a";
    const TIMEOUT: Duration = Duration::from_millis(8000);

    fn page(blocks: &[&str]) -> String {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{}</script>"#, b))
            .collect();
        format!("<html><head>{}</head><body><h1>Heading</h1></body></html>", scripts)
    }

    #[tokio::test]
    async fn test_recipe_then_article() {
        let html = page(&[
            r#"{"@type":"Recipe","name":"Soup"}"#,
            r#"{"@type":"Article","headline":"T","articleBody":" body text "}"#,
        ]);
        let mut session = MemorySession::new().with_page(URL, &html);

        let record = extract_article(&mut session, URL, TIMEOUT).await.unwrap();
        assert_eq!(record, ArticleRecord::new(Some("T"), URL, "body text"));
    }

    #[tokio::test]
    async fn test_broken_block_does_not_abort_page() {
        let html = page(&[
            r#"{"@type": "Article", "headline": "#,
            r#"{"@type":"Article","headline":"Kept","articleBody":"Body"}"#,
        ]);
        let mut session = MemorySession::new().with_page(URL, &html);

        let record = extract_article(&mut session, URL, TIMEOUT).await.unwrap();
        assert_eq!(record.title, "Kept");
    }

    #[tokio::test]
    async fn test_missing_body_yields_no_record() {
        let html = page(&[r#"{"@type":"Article","headline":"No body"}"#]);
        let mut session = MemorySession::new().with_page(URL, &html);

        let result = extract_article(&mut session, URL, TIMEOUT).await;
        assert!(matches!(result, Err(Error::MissingContent(u)) if u == URL));
    }

    #[tokio::test]
    async fn test_no_article_block_is_missing_content() {
        let html = page(&[r#"{"@type":"Organization","name":"Fique"}"#]);
        let mut session = MemorySession::new().with_page(URL, &html);

        let result = extract_article(&mut session, URL, TIMEOUT).await;
        assert!(matches!(result, Err(Error::MissingContent(_))));
    }

    #[tokio::test]
    async fn test_page_without_structured_data_times_out() {
        let mut session = MemorySession::new().with_page(URL, "<html><body>plain</body></html>");

        let result = extract_article(&mut session, URL, TIMEOUT).await;
        assert!(matches!(result, Err(Error::SelectorTimeout { timeout_ms: 8000, .. })));
    }
}
