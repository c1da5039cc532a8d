//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch_api::BatchApiClient;
use crate::storage::StorageClient;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::debug;

/// HTTP server state shared across handlers
///
/// Built once at startup and dropped when the server stops. All fields are
/// wrapped in Arc for cheap sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Batch manager configuration (shared read-only)
    pub config: Arc<Config>,
    /// Client for the external batch API
    pub batch_api: Arc<BatchApiClient>,
    /// S3 client using the default credential chain
    pub storage: Arc<StorageClient>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, batch_api: BatchApiClient, storage: StorageClient) -> Self {
        Self {
            config: Arc::new(config),
            batch_api: Arc::new(batch_api),
            storage: Arc::new(storage),
        }
    }

    /// Build the clients described by `config`
    pub async fn from_config(config: Config) -> Result<Self> {
        let batch_api = BatchApiClient::new(config.batch_api())?;
        let storage = StorageClient::new(config.storage()).await?;
        debug!("Application state initialized");
        Ok(Self::new(config, batch_api, storage))
    }

    /// Get batch manager configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
