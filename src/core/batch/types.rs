//! Batch packaging types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Endpoint every job record targets
pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/v1/chat/completions";

/// Name of the manifest entry inside each archive
pub const MANIFEST_NAME: &str = "jobs.jsonl";

/// Directory prefix of the file entries inside each archive
pub const FILES_DIR: &str = "files";

/// Scheme prefix used for in-archive file references
pub const FILE_REFERENCE_SCHEME: &str = "file:";

/// A regular file picked up from the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    /// Full path on disk
    pub path: PathBuf,
    /// Base name, used for the archive entry and the manifest reference
    pub name: String,
}

impl SourceItem {
    /// `None` when the base name is missing or not valid UTF-8, since such a
    /// name has no faithful `files/<name>` entry
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self { path, name })
    }

    /// Path of this item inside an archive, e.g. `files/cat.png`
    pub fn archive_path(&self) -> String {
        format!("{}/{}", FILES_DIR, self.name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Ordered group of items that becomes one archive
pub type BatchGroup = Vec<SourceItem>;

/// One line of `jobs.jsonl`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// 32 lowercase hex characters unless supplied by the caller
    pub custom_id: String,
    pub method: String,
    pub url: String,
    pub body: JobBody,
}

impl JobRecord {
    /// The in-archive path referenced by the record's image part, without the
    /// `file:` prefix
    pub fn file_reference(&self) -> Option<&str> {
        self.body
            .messages
            .iter()
            .flat_map(|m| m.content.iter())
            .find_map(|part| match part {
                ContentPart::ImageUrl { image_url } => image_url
                    .url
                    .strip_prefix(FILE_REFERENCE_SCHEME)
                    .or(Some(image_url.url.as_str())),
                ContentPart::Text { .. } => None,
            })
    }

    /// Prompt text of the record
    pub fn prompt(&self) -> Option<&str> {
        self.body
            .messages
            .iter()
            .flat_map(|m| m.content.iter())
            .find_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::ImageUrl { .. } => None,
            })
    }
}

/// Chat completion request body carried by a job record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobBody {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Chat message with multi-part content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// Content part of a chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Order in which directory entries are grouped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryOrder {
    /// Sort by file name so grouping is reproducible across platforms
    #[default]
    ByName,
    /// Whatever order the platform's directory listing returns
    Native,
}

/// Failure to produce a single archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub group_index: usize,
    pub error: String,
}

/// Outcome of packaging a whole directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Archives created, in creation order
    pub archives: Vec<PathBuf>,
    /// Groups that could not be written
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of groups attempted
    pub fn total(&self) -> usize {
        self.archives.len() + self.failures.len()
    }
}
