//! Error types for the batch manager

use thiserror::Error;

/// Result type alias for the batch manager
pub type Result<T> = std::result::Result<T, ManagerError>;

/// Main error type for the batch manager
#[derive(Error, Debug)]
pub enum ManagerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failures talking to the batch API (timeouts excluded)
    #[error("HTTP client error: {0}")]
    HttpClient(reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Object storage errors (presigning, bucket/object probes)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Non-2xx response from the external batch API.
    ///
    /// `body` is the remote response text, untouched.
    #[error("Batch API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The batch API did not answer within the configured timeout
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ManagerError {
    /// Whether the caller supplied bad input (never worth retrying)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ManagerError::Validation(_) | ManagerError::BadRequest(_) | ManagerError::NotFound(_)
        )
    }
}

impl From<reqwest::Error> for ManagerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ManagerError::Timeout(err.to_string())
        } else {
            ManagerError::HttpClient(err)
        }
    }
}
