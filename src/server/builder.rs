//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{ManagerError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ManagerError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the dashboard from `config` and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting batch manager {}", crate::build_info());
    info!("Batch API: {}", config.batch_api().base_url);
    info!("Default S3 bucket: {}", config.storage().default_bucket);

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Dashboard available at http://{}", server.config().address());

    server.start().await
}
