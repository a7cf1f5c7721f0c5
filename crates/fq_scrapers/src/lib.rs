pub mod cli;
pub mod crawl;
pub mod logging;
pub mod scrapers;
pub mod session;
pub mod sink;

pub use cli::{handle_command, Engine, ScrapeArgs};
pub use crawl::{crawl, CrawlReport, SkipReason};
pub use session::{HttpSession, MemorySession};
