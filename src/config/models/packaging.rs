//! Batch packaging defaults

use super::*;
use serde::{Deserialize, Serialize};

/// Defaults applied by `make-batch` when flags are omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingConfig {
    /// Model named in every job record
    #[serde(default = "default_model")]
    pub model: String,
    /// Response size limit for every job record
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Keep the platform's directory order instead of sorting by name
    #[serde(default)]
    pub native_order: bool,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            native_order: false,
        }
    }
}
