use clap::Args;
use fq_core::config::{PublishConfig, CONTAINER_NAME, OUTPUT_FILE};
use fq_core::Result;
use std::path::PathBuf;
use tracing::info;

use crate::publisher::{publish, PublishReport};

#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// File to upload; the blob takes its file name
    #[arg(long, default_value = OUTPUT_FILE)]
    pub file: PathBuf,
    /// Target container, created when missing
    #[arg(long, default_value = CONTAINER_NAME)]
    pub container: String,
}

impl UploadArgs {
    pub fn to_config(&self) -> Result<PublishConfig> {
        Ok(PublishConfig::from_env(&self.file)?.with_container(&self.container))
    }
}

/// Uploads with the connection string from the environment.
pub async fn handle_command(args: UploadArgs) -> Result<PublishReport> {
    let config = args.to_config()?;
    let store = crate::create_store(&config.connection_string)?;
    info!("☁️ Uploading {} to {}/{}", config.local_file.display(), config.container, config.blob_name);
    publish(store.as_ref(), &config).await
}
