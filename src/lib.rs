//! # batch-manager
//!
//! Tooling for batch inference jobs that run on an external batch API:
//!
//! - **Packaging**: split a directory of images into `batch-NNNNN.tar.gz`
//!   archives, each carrying a `jobs.jsonl` manifest of chat completion jobs
//! - **Presigning**: time-limited S3 GET/PUT URLs for job input and output
//! - **Batch API client**: create, list, inspect, cancel and retry batches
//! - **Dashboard**: an actix-web backend and page wrapping all of the above
//!
//! ## Packaging a directory
//!
//! ```rust,no_run
//! use batch_manager::core::batch::{BatchOptions, write_batches};
//! use std::path::Path;
//!
//! fn main() -> batch_manager::Result<()> {
//!     let options = BatchOptions::new("What is in this image?").with_output_dir("out");
//!     let summary = write_batches(&options, Path::new("images"), 50)?;
//!     for archive in &summary.archives {
//!         println!("written batch: {}", archive.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Dashboard mode
//!
//! ```rust,no_run
//! use batch_manager::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{BatchOptions, BatchSummary, JobRecord};
pub use core::batch_api::{BatchApiClient, CreateBatchRequest};
pub use storage::{ExplicitCredentials, PresignedUrls, StorageClient};
pub use utils::error::{ManagerError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, built with {})",
            self.version, self.git_hash, self.rust_version
        )
    }
}

/// Metadata of the running build, logged when the dashboard starts
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
