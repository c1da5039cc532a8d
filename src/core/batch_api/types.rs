//! Batch API request types and validation

use crate::core::batch::CHAT_COMPLETIONS_ENDPOINT;
use crate::utils::error::{ManagerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Page size used when listing batches without an explicit limit
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Largest page size accepted when listing batches
pub const MAX_LIST_LIMIT: u32 = 500;

/// Shortest accepted `batch_id`
const MIN_BATCH_ID_LEN: usize = 3;

const REQUIRED_FIELDS: [&str; 5] = [
    "batch_id",
    "input_file_id",
    "output_file_id",
    "endpoint",
    "completion_window",
];

/// Time frame within which a batch must complete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionWindow {
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[default]
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
}

impl CompletionWindow {
    pub const ALL: [CompletionWindow; 4] = [
        CompletionWindow::SixHours,
        CompletionWindow::TwelveHours,
        CompletionWindow::OneDay,
        CompletionWindow::SevenDays,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionWindow::SixHours => "6h",
            CompletionWindow::TwelveHours => "12h",
            CompletionWindow::OneDay => "24h",
            CompletionWindow::SevenDays => "7d",
        }
    }
}

impl fmt::Display for CompletionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionWindow {
    type Err = ManagerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| {
                ManagerError::validation(format!(
                    "completion_window must be one of {}",
                    window_list()
                ))
            })
    }
}

fn window_list() -> String {
    CompletionWindow::ALL
        .iter()
        .map(|w| w.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Payload for `POST /v1/batches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// URL (typically presigned GET) of the input archive
    pub input_file_id: String,
    /// URL (typically presigned PUT) the results are written to
    pub output_file_id: String,
    pub endpoint: String,
    pub completion_window: CompletionWindow,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl CreateBatchRequest {
    /// Chat completion batch over the given input and output locations
    pub fn new(input_file_id: impl Into<String>, output_file_id: impl Into<String>) -> Self {
        Self {
            batch_id: None,
            input_file_id: input_file_id.into(),
            output_file_id: output_file_id.into(),
            endpoint: CHAT_COMPLETIONS_ENDPOINT.to_string(),
            completion_window: CompletionWindow::default(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_batch_id(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_completion_window(mut self, window: CompletionWindow) -> Self {
        self.completion_window = window;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Check a raw batch creation payload before it is forwarded.
///
/// Every required field must be a non-empty string, `completion_window` must
/// be a known window and `batch_id` must have at least three characters.
pub fn validate_batch_request(data: &Value) -> Result<()> {
    let object = data
        .as_object()
        .ok_or_else(|| ManagerError::validation("Request body must be a JSON object"))?;

    for name in REQUIRED_FIELDS {
        required_str(object, name)?;
    }

    required_str(object, "completion_window")?.parse::<CompletionWindow>()?;

    if required_str(object, "batch_id")?.chars().count() < MIN_BATCH_ID_LEN {
        return Err(ManagerError::validation(format!(
            "batch_id must be at least {} characters long",
            MIN_BATCH_ID_LEN
        )));
    }

    Ok(())
}

fn required_str<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a str> {
    match object.get(name) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
        None | Some(Value::Null) | Some(Value::String(_)) => Err(ManagerError::validation(
            format!("Field '{}' is required", name),
        )),
        Some(_) => Err(ManagerError::validation(format!(
            "Field '{}' must be a string",
            name
        ))),
    }
}
