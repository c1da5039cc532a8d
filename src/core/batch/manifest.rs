//! Job records and the temporary `jobs.jsonl` manifest

use super::types::{
    CHAT_COMPLETIONS_ENDPOINT, ChatMessage, ContentPart, FILE_REFERENCE_SCHEME, ImageUrl,
    JobBody, JobRecord,
};
use crate::utils::error::Result;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Fresh job id: a v4 UUID as 32 lowercase hex characters
pub fn new_custom_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Build the chat completion job for one archived file.
///
/// `relative_path` is the file's path inside the archive (`files/<name>`).
/// Prompt and model are passed through as given.
pub fn build_job_record(
    prompt: &str,
    relative_path: &str,
    model: &str,
    max_tokens: u32,
    custom_id: Option<String>,
) -> JobRecord {
    JobRecord {
        custom_id: custom_id.unwrap_or_else(new_custom_id),
        method: "POST".to_string(),
        url: CHAT_COMPLETIONS_ENDPOINT.to_string(),
        body: JobBody {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("{}{}", FILE_REFERENCE_SCHEME, relative_path),
                        },
                    },
                ],
            }],
            max_tokens,
        },
    }
}

/// Line-per-record manifest backed by a temp file.
///
/// The file is deleted when the writer (or the finished temp file) is dropped.
pub struct ManifestWriter {
    writer: BufWriter<NamedTempFile>,
}

impl ManifestWriter {
    /// Create a manifest inside `dir`, named after the group it belongs to
    pub fn create(dir: &Path, group_index: usize) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(&format!(".jobs-{:05}-", group_index))
            .suffix(".jsonl")
            .tempfile_in(dir)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append one record as a single JSON line
    pub fn append(&mut self, record: &JobRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush and hand back the temp file, ready to be archived
    pub fn finish(self) -> Result<NamedTempFile> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.as_file().sync_all()?;
        Ok(file)
    }
}
