//! Batch packaging
//!
//! Turns a directory of input files into compressed batch archives that the
//! external batch API can consume:
//!
//! - [`partition`]: groups the directory's regular files
//! - [`build_job_record`]: one chat completion job per file
//! - [`write_batch`] / [`write_batches`]: archive writers

mod archive;
mod manifest;
mod partition;
mod types;

pub use archive::{BatchOptions, archive_name, write_batch, write_batches, write_batches_concurrent};
pub use manifest::{ManifestWriter, build_job_record, new_custom_id};
pub use partition::{BatchPartitioner, partition};
pub use types::*;
