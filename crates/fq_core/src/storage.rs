use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Creates `container`, failing with `Error::ContainerAlreadyExists`
    /// when it is already there
    async fn create_container(&self, container: &str) -> Result<()>;

    /// Writes `data` as blob `name`, replacing any existing content when
    /// `overwrite` is set
    async fn upload_blob(&self, container: &str, name: &str, data: Vec<u8>, overwrite: bool) -> Result<()>;
}
