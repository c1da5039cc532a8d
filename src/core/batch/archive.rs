//! Batch archive writer
//!
//! Each group becomes `batch-{index:05}.tar.gz` holding its files under
//! `files/` followed by a `jobs.jsonl` manifest with one job per file.

use super::manifest::{ManifestWriter, build_job_record};
use super::partition::partition;
use super::types::{BatchFailure, BatchGroup, BatchSummary, EntryOrder, MANIFEST_NAME};
use crate::config::PackagingConfig;
use crate::utils::error::{ManagerError, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use futures::stream::{self, StreamExt};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

/// Permissions of the `jobs.jsonl` entry
const MANIFEST_MODE: u32 = 0o644;

/// Settings shared by every archive of a packaging run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Prompt attached to every image
    pub prompt: String,
    /// Model named in every job record
    pub model: String,
    /// Response size limit for every job record
    pub max_tokens: u32,
    /// Where archives are written; the working directory when unset
    pub output_dir: Option<PathBuf>,
    /// How directory entries are ordered before grouping
    pub entry_order: EntryOrder,
}

impl BatchOptions {
    /// Create options for `prompt` with the packaging defaults
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::from_config(prompt, &PackagingConfig::default())
    }

    /// Create options for `prompt` using configured defaults
    pub fn from_config(prompt: impl Into<String>, config: &PackagingConfig) -> Self {
        Self {
            prompt: prompt.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            output_dir: None,
            entry_order: if config.native_order {
                EntryOrder::Native
            } else {
                EntryOrder::ByName
            },
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_entry_order(mut self, order: EntryOrder) -> Self {
        self.entry_order = order;
        self
    }

    /// Directory archives are written to
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

/// File name of the archive for a group, e.g. `batch-00003.tar.gz`
pub fn archive_name(group_index: usize) -> String {
    format!("batch-{:05}.tar.gz", group_index)
}

/// Write one group as a compressed archive and return its path.
///
/// A failed write leaves no archive behind.
pub fn write_batch(options: &BatchOptions, group_index: usize, group: &BatchGroup) -> Result<PathBuf> {
    if group.is_empty() {
        return Err(ManagerError::validation(format!(
            "Batch {} has no files",
            group_index
        )));
    }

    let out_dir = options.output_dir();
    fs::create_dir_all(out_dir)?;
    let archive_path = out_dir.join(archive_name(group_index));

    if let Err(e) = build_archive(options, group_index, group, &archive_path) {
        if archive_path.exists() {
            if let Err(remove_err) = fs::remove_file(&archive_path) {
                warn!(
                    "Failed to remove partial archive {}: {}",
                    archive_path.display(),
                    remove_err
                );
            }
        }
        return Err(e);
    }

    debug!(
        "Wrote {} with {} jobs",
        archive_path.display(),
        group.len()
    );
    Ok(archive_path)
}

fn build_archive(
    options: &BatchOptions,
    group_index: usize,
    group: &BatchGroup,
    archive_path: &Path,
) -> Result<()> {
    let file = File::create(archive_path)?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    let mut manifest = ManifestWriter::create(options.output_dir(), group_index)?;

    for item in group {
        let entry_name = item.archive_path();
        builder.append_path_with_name(&item.path, &entry_name)?;

        let record = build_job_record(
            &options.prompt,
            &entry_name,
            &options.model,
            options.max_tokens,
            None,
        );
        manifest.append(&record)?;
    }

    let manifest = manifest.finish()?;
    let mut header = manifest_header(manifest.as_file().metadata()?.len());
    builder.append_data(&mut header, MANIFEST_NAME, manifest.reopen()?)?;

    let encoder = builder.into_inner()?;
    let file = encoder.finish()?;
    file.sync_all()?;
    Ok(())
}

/// Header for `jobs.jsonl`: world-readable and stamped with the packaging time,
/// not the temp file's private mode
fn manifest_header(size: u64) -> tar::Header {
    let mtime = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(size);
    header.set_mode(MANIFEST_MODE);
    header.set_mtime(mtime);
    header
}

/// Package every regular file of `dir` into archives of at most `batch_size`
/// files.
///
/// A failed group is recorded and the run moves on; a failure to read the
/// directory aborts the run.
pub fn write_batches(options: &BatchOptions, dir: &Path, batch_size: usize) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for (index, group) in partition(dir, batch_size, options.entry_order)?.enumerate() {
        let group = group?;
        record_outcome(&mut summary, index, write_batch(options, index, &group));
    }

    info!(
        "Packaged {} into {} archives ({} failed)",
        dir.display(),
        summary.archives.len(),
        summary.failures.len()
    );
    Ok(summary)
}

/// Like [`write_batches`], but writes up to `concurrency` archives at once on
/// the blocking thread pool.
///
/// Group indices follow directory order and the summary lists archives in
/// index order.
pub async fn write_batches_concurrent(
    options: BatchOptions,
    dir: PathBuf,
    batch_size: usize,
    concurrency: usize,
) -> Result<BatchSummary> {
    let order = options.entry_order;
    let groups = tokio::task::spawn_blocking(move || {
        partition(&dir, batch_size, order)?.collect::<Result<Vec<_>>>()
    })
    .await
    .map_err(|e| ManagerError::internal(format!("Partition task failed: {}", e)))??;

    let outcomes: Vec<(usize, Result<PathBuf>)> = stream::iter(groups.into_iter().enumerate())
        .map(|(index, group)| {
            let options = options.clone();
            async move {
                let result = tokio::task::spawn_blocking(move || write_batch(&options, index, &group))
                    .await
                    .map_err(|e| ManagerError::internal(format!("Batch {} task failed: {}", index, e)))
                    .and_then(|r| r);
                (index, result)
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut summary = BatchSummary::default();
    for (index, result) in outcomes {
        record_outcome(&mut summary, index, result);
    }

    info!(
        "Packaged {} archives concurrently ({} failed)",
        summary.archives.len(),
        summary.failures.len()
    );
    Ok(summary)
}

fn record_outcome(summary: &mut BatchSummary, index: usize, result: Result<PathBuf>) {
    match result {
        Ok(path) => {
            debug!("written batch: {}", path.display());
            summary.archives.push(path);
        }
        Err(e) => {
            error!("Failed to write batch {}: {}", index, e);
            summary.failures.push(BatchFailure {
                group_index: index,
                error: e.to_string(),
            });
        }
    }
}
