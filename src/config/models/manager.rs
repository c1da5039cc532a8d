//! Top-level batch manager configuration

#![allow(missing_docs)]

use super::*;
use serde::{Deserialize, Serialize};

/// Top-level configuration shared by the dashboard and the CLI tools
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ManagerConfig {
    /// Dashboard server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// External batch API configuration
    #[serde(default)]
    pub batch_api: BatchApiConfig,
    /// Object storage configuration
    #[serde(default)]
    pub storage: S3Config,
    /// Packaging defaults
    #[serde(default)]
    pub packaging: PackagingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
