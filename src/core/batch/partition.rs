//! Directory partitioning

use super::types::{BatchGroup, EntryOrder, SourceItem};
use crate::utils::error::{ManagerError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

type EntryIter = Box<dyn Iterator<Item = io::Result<PathBuf>> + Send>;

/// Lazily groups the regular files of a directory into batches.
///
/// Yields groups of exactly `batch_size` items, except the last one which holds
/// the remainder. Empty groups are never produced.
pub struct BatchPartitioner {
    entries: EntryIter,
    batch_size: usize,
    done: bool,
}

impl std::fmt::Debug for BatchPartitioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchPartitioner")
            .field("batch_size", &self.batch_size)
            .field("done", &self.done)
            .finish()
    }
}

/// Partition the regular files directly inside `dir` into groups of at most
/// `batch_size` items.
///
/// Subdirectories and other non-file entries are skipped; symlinks to regular
/// files are included. Files whose names are not valid UTF-8 are skipped with a
/// warning.
pub fn partition(dir: &Path, batch_size: usize, order: EntryOrder) -> Result<BatchPartitioner> {
    if batch_size == 0 {
        return Err(ManagerError::validation("batch_size must be at least 1"));
    }

    let read_dir = fs::read_dir(dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            ManagerError::not_found(format!("Directory not found: {}", dir.display()))
        }
        io::ErrorKind::NotADirectory => {
            ManagerError::validation(format!("Not a directory: {}", dir.display()))
        }
        _ => ManagerError::Io(e),
    })?;

    let entries: EntryIter = match order {
        EntryOrder::Native => Box::new(read_dir.map(|entry| entry.map(|e| e.path()))),
        EntryOrder::ByName => {
            let mut paths = read_dir
                .map(|entry| entry.map(|e| e.path()))
                .collect::<io::Result<Vec<_>>>()?;
            paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            Box::new(paths.into_iter().map(Ok))
        }
    };

    debug!(
        "Partitioning {} into groups of {} ({:?} order)",
        dir.display(),
        batch_size,
        order
    );

    Ok(BatchPartitioner {
        entries,
        batch_size,
        done: false,
    })
}

impl Iterator for BatchPartitioner {
    type Item = Result<BatchGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut group = Vec::with_capacity(self.batch_size);
        for entry in self.entries.by_ref() {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    self.done = true;
                    return Some(Err(ManagerError::Io(e)));
                }
            };

            if !path.is_file() {
                continue;
            }

            match SourceItem::new(&path) {
                Some(item) => group.push(item),
                None => {
                    warn!("Skipping {}: file name is not valid UTF-8", path.display());
                    continue;
                }
            }
            if group.len() == self.batch_size {
                return Some(Ok(group));
            }
        }

        self.done = true;
        if group.is_empty() {
            None
        } else {
            Some(Ok(group))
        }
    }
}

impl std::iter::FusedIterator for BatchPartitioner {}
