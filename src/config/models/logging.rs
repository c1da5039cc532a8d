//! Logging configuration

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Level for this crate's targets; `RUST_LOG` overrides it
    #[serde(default)]
    pub level: Option<String>,
    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}
