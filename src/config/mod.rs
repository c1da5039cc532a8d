//! Configuration management for the batch manager
//!
//! This module handles loading, validation, and management of all configuration.
//! Sources, lowest precedence first: built-in defaults, the YAML file, the
//! environment.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ManagerError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Default location of the YAML configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/batch-manager.yaml";

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Batch manager configuration
    pub manager: ManagerConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ManagerError::Config(format!("Failed to read config file: {}", e)))?;

        let manager: ManagerConfig = serde_yaml::from_str(&content)
            .map_err(|e| ManagerError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { manager };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load the file when present, then apply environment overrides.
    ///
    /// An explicitly requested file must exist; the default path is optional.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let manager = match path {
            Some(path) => Self::from_file(path).await?.manager,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH).await?.manager
            }
            None => {
                debug!("No configuration file found, using defaults");
                ManagerConfig::default()
            }
        };

        let config = Self {
            manager: manager.apply_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.manager.server
    }

    /// Get batch API configuration
    pub fn batch_api(&self) -> &BatchApiConfig {
        &self.manager.batch_api
    }

    /// Get storage configuration
    pub fn storage(&self) -> &S3Config {
        &self.manager.storage
    }

    /// Get packaging defaults
    pub fn packaging(&self) -> &PackagingConfig {
        &self.manager.packaging
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.manager.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.manager
            .validate()
            .map_err(|e| ManagerError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.manager)
            .map_err(|e| ManagerError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
