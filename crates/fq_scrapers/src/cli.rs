use clap::{Args, ValueEnum};
use fq_core::config::{ScrapeConfig, OUTPUT_FILE};
use fq_core::{PageSession, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::crawl::{self, CrawlReport};
use crate::session::HttpSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// Plain HTTP fetch, parsed with scraper
    Http,
    /// Headless Chromium (needs the `browser` feature)
    Browser,
}

#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    /// Where to write the JSON lines output
    #[arg(long, default_value = OUTPUT_FILE)]
    pub output: PathBuf,
    /// Listing page to collect article links from
    #[arg(long)]
    pub listing_url: Option<String>,
    /// How long to wait for structured data on each article page
    #[arg(long, default_value_t = 8000)]
    pub timeout_ms: u64,
    /// Page rendering engine
    #[arg(long, value_enum, default_value_t = Engine::Http)]
    pub engine: Engine,
}

impl ScrapeArgs {
    pub fn to_config(&self) -> Result<ScrapeConfig> {
        let mut config = ScrapeConfig::new()?
            .with_output_path(&self.output)
            .with_selector_timeout(Duration::from_millis(self.timeout_ms));
        if let Some(listing_url) = &self.listing_url {
            config = config.with_listing_url(listing_url)?;
        }
        Ok(config)
    }
}

pub async fn open_session(engine: Engine) -> Result<Box<dyn PageSession>> {
    match engine {
        Engine::Http => Ok(Box::new(HttpSession::new()?)),
        #[cfg(feature = "browser")]
        Engine::Browser => Ok(Box::new(crate::session::BrowserSession::launch().await?)),
        #[cfg(not(feature = "browser"))]
        Engine::Browser => Err(fq_core::Error::Config(
            "built without the `browser` feature; use --engine http".to_string(),
        )),
    }
}

pub async fn handle_command(args: ScrapeArgs) -> Result<CrawlReport> {
    let config = args.to_config()?;
    let mut session = open_session(args.engine).await?;
    info!("🦗 Scraping {} with the {} engine", config.listing_url, session.name());

    let (report, _path) = crawl::run(session.as_mut(), &config).await?;
    Ok(report)
}
