//! Error Handling utilities
//!
//! This module provides the error type shared by the packager, the storage
//! layer, the batch API client and the dashboard server.

pub mod error;

// Re-export commonly used types and functions
pub use error::*;
