//! Configuration data models
//!
//! This module defines all configuration structures used by the binaries and
//! the dashboard server.

#![allow(missing_docs)]

pub mod batch_api;
pub mod logging;
pub mod manager;
pub mod packaging;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use batch_api::*;
pub use logging::*;
pub use manager::*;
pub use packaging::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default dashboard port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_batch_api_url() -> String {
    "http://localhost:8000".to_string()
}

pub fn default_bucket() -> String {
    "modular-batch-api-batches".to_string()
}

/// Presigned URL lifetime: 7 days, the SigV4 maximum
pub fn default_expires_in() -> u64 {
    604_800
}

pub fn default_model() -> String {
    "OpenGVLab/InternVL3-38B-Instruct".to_string()
}

pub fn default_max_tokens() -> u32 {
    100
}

pub fn default_static_dir() -> String {
    "static".to_string()
}
