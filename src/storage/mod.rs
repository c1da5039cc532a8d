//! Object storage access
//!
//! Presigned GET/PUT URL generation for batch inputs and outputs, plus the
//! bucket and object probes used by the dashboard.

mod client;
pub mod presign;

pub use client::{FALLBACK_REGION, StorageClient};
pub use presign::{ExplicitCredentials, MAX_EXPIRES_IN, PresignedUrls, default_output_key};
