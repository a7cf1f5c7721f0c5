use fq_core::config::ScrapeConfig;
use fq_core::{ArticleRecord, Error, PageSession, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::logging::Progress;
use crate::scrapers::{collect_links, extract_article};
use crate::sink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    SelectorTimeout,
    MissingContent,
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SelectorTimeout => write!(f, "structured data timeout"),
            SkipReason::MissingContent => write!(f, "missing articleBody"),
            SkipReason::Failed(message) => write!(f, "{}", message),
        }
    }
}

/// Outcome of one crawl: records in sorted URL order plus every skipped URL.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub records: Vec<ArticleRecord>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl CrawlReport {
    pub fn attempted(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Collects links, then visits each one in order on the same session.
///
/// Only a listing failure is returned as an error; per-article failures are
/// logged and recorded in the report.
pub async fn crawl(session: &mut dyn PageSession, config: &ScrapeConfig) -> Result<CrawlReport> {
    let links = collect_links(session, config).await?;
    info!("🧾 Found {} articles. Scraping...", links.len());

    let mut report = CrawlReport::default();
    let total = links.len();
    for (i, url) in links.into_iter().enumerate() {
        let progress = Progress::new(i, total);
        match extract_article(session, &url, config.selector_timeout).await {
            Ok(record) => {
                progress.info(&format!("✅ Scraped: {}", record.title));
                report.records.push(record);
            }
            Err(Error::MissingContent(_)) => {
                progress.warn(&format!("⚠️ Skipped (missing articleBody): {}", url));
                report.skipped.push((url, SkipReason::MissingContent));
            }
            Err(Error::SelectorTimeout { timeout_ms, .. }) => {
                progress.warn(&format!("⏱️ Skipped (no structured data after {}ms): {}", timeout_ms, url));
                report.skipped.push((url, SkipReason::SelectorTimeout));
            }
            Err(e) => {
                progress.error(&format!("❌ Error scraping {}: {}", url, e));
                report.skipped.push((url, SkipReason::Failed(e.to_string())));
            }
        }
    }

    Ok(report)
}

/// Runs a crawl and closes the session whatever the crawl returned.
pub async fn crawl_and_close(session: &mut dyn PageSession, config: &ScrapeConfig) -> Result<CrawlReport> {
    let result = crawl(session, config).await;
    if let Err(e) = session.close().await {
        warn!("⚠️ Failed to close {} session: {}", session.name(), e);
    }
    result
}

/// Full scrape: crawl, close the session, then write the output file once.
pub async fn run(session: &mut dyn PageSession, config: &ScrapeConfig) -> Result<(CrawlReport, PathBuf)> {
    let report = crawl_and_close(session, config).await?;
    let path = sink::write_records(&config.output_path, &report.records)?;

    info!("🎉 Done! Scraped {} articles.", report.records.len());
    if !report.skipped.is_empty() {
        info!("⏭️ Skipped {} of {} articles.", report.skipped.len(), report.attempted());
    }
    info!("📁 Saved to: {}", path.display());

    Ok((report, path))
}
