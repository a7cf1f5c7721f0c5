use async_trait::async_trait;
use fq_core::{BlobStore, Error, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

type Container = HashMap<String, Vec<u8>>;

/// Containers of blobs held in process memory.
#[derive(Default)]
pub struct MemoryBlobStore {
    containers: RwLock<HashMap<String, Container>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_container(self, container: &str) -> Self {
        self.containers.write().await.entry(container.to_string()).or_default();
        self
    }

    pub async fn blob(&self, container: &str, name: &str) -> Option<Vec<u8>> {
        self.containers.read().await.get(container)?.get(name).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn create_container(&self, container: &str) -> Result<()> {
        let mut containers = self.containers.write().await;
        if containers.contains_key(container) {
            return Err(Error::ContainerAlreadyExists(container.to_string()));
        }
        containers.insert(container.to_string(), Container::new());
        Ok(())
    }

    async fn upload_blob(&self, container: &str, name: &str, data: Vec<u8>, overwrite: bool) -> Result<()> {
        let mut containers = self.containers.write().await;
        let blobs = containers
            .get_mut(container)
            .ok_or_else(|| Error::Storage(format!("Container not found: {}", container)))?;
        if !overwrite && blobs.contains_key(name) {
            return Err(Error::Storage(format!("Blob already exists: {}/{}", container, name)));
        }
        blobs.insert(name.to_string(), data);
        Ok(())
    }
}
