pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use session::PageSession;
pub use storage::BlobStore;
pub use types::{read_jsonl, ArticleRecord, UNTITLED};
