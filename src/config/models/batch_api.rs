//! External batch API configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the external batch service lives and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchApiConfig {
    /// Scheme, host and port of the batch API, e.g. `http://localhost:8000`
    #[serde(default = "default_batch_api_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for BatchApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_batch_api_url(),
            timeout: default_timeout(),
        }
    }
}

impl BatchApiConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
