//! Object storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// S3 (or S3-compatible) storage settings.
///
/// Credentials are not part of the file config: they come from the default
/// AWS chain or are passed explicitly per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket used when a request does not name one
    #[serde(default = "default_bucket")]
    pub default_bucket: String,
    /// AWS region; the credential chain decides when unset
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint URL for S3-compatible services (MinIO, R2, ...)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Use path-style addressing (`{endpoint}/{bucket}/{key}`)
    #[serde(default)]
    pub force_path_style: bool,
    /// Presigned URL lifetime in seconds
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            default_bucket: default_bucket(),
            region: None,
            endpoint: None,
            force_path_style: false,
            expires_in: default_expires_in(),
        }
    }
}
