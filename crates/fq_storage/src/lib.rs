use fq_core::{BlobStore, Result};
use std::sync::Arc;

pub mod backends;
pub mod cli;
pub mod publisher;

pub use backends::*;
pub use publisher::{publish, ContainerStatus, PublishReport, PublishState, Publisher};

/// Opens the store a connection string points at.
pub fn create_store(connection_string: &str) -> Result<Arc<dyn BlobStore>> {
    Ok(Arc::new(AzureBlobStore::from_connection_string(connection_string)?))
}
