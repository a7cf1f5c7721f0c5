pub mod azure;
pub mod memory;

pub use azure::AzureBlobStore;
pub use memory::MemoryBlobStore;
