use fq_core::config::PublishConfig;
use fq_core::{read_jsonl, BlobStore, Error, Result};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Start,
    ContainerEnsured,
    Uploaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Created,
    AlreadyExisted,
    /// Creation failed for another reason; the upload decides.
    Unverified,
}

#[derive(Debug)]
pub struct PublishReport {
    pub state: PublishState,
    pub container: ContainerStatus,
    pub blob_name: String,
    pub records: usize,
    pub bytes: usize,
}

/// Uploads the scrape output: `Start → ContainerEnsured → Uploaded`.
///
/// Container creation never fails the publish. Upload errors do.
pub struct Publisher<'a> {
    store: &'a dyn BlobStore,
    config: &'a PublishConfig,
    state: PublishState,
}

impl<'a> Publisher<'a> {
    pub fn new(store: &'a dyn BlobStore, config: &'a PublishConfig) -> Self {
        Self {
            store,
            config,
            state: PublishState::Start,
        }
    }

    pub fn state(&self) -> PublishState {
        self.state
    }

    pub async fn ensure_container(&mut self) -> ContainerStatus {
        let container = &self.config.container;
        let status = match self.store.create_container(container).await {
            Ok(()) => {
                info!("📦 Created container {}", container);
                ContainerStatus::Created
            }
            Err(Error::ContainerAlreadyExists(_)) => {
                info!("📦 Container {} already exists, continuing...", container);
                ContainerStatus::AlreadyExisted
            }
            Err(e) => {
                warn!("⚠️ Could not create container {} ({}), continuing...", container, e);
                ContainerStatus::Unverified
            }
        };
        self.state = PublishState::ContainerEnsured;
        status
    }

    /// Reads the local file and replaces the remote blob with it. A file that
    /// does not parse as article lines is never sent.
    ///
    /// Returns the record count and the byte count.
    pub async fn upload(&mut self) -> Result<(usize, usize)> {
        if self.state != PublishState::ContainerEnsured {
            return Err(Error::Storage(format!(
                "Cannot upload from state {:?}; ensure the container first",
                self.state
            )));
        }
        let data = tokio::fs::read(&self.config.local_file).await?;
        let records = read_jsonl(data.as_slice())?.len();
        let bytes = data.len();
        self.store
            .upload_blob(&self.config.container, &self.config.blob_name, data, true)
            .await?;

        self.state = PublishState::Uploaded;
        info!(
            "✅ Uploaded {} ({} records, {} bytes) to {}/{}",
            self.config.local_file.display(),
            records,
            bytes,
            self.config.container,
            self.config.blob_name
        );
        Ok((records, bytes))
    }

    pub async fn run(mut self) -> Result<PublishReport> {
        let container = self.ensure_container().await;
        let (records, bytes) = self.upload().await?;
        Ok(PublishReport {
            state: self.state,
            container,
            blob_name: self.config.blob_name.clone(),
            records,
            bytes,
        })
    }
}

pub async fn publish(store: &dyn BlobStore, config: &PublishConfig) -> Result<PublishReport> {
    Publisher::new(store, config).run().await
}
