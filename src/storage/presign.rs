//! Presigned URL generation

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::error::{ManagerError, Result};

/// Longest lifetime S3 SigV4 allows for a presigned URL (7 days)
pub const MAX_EXPIRES_IN: u64 = 604_800;

/// Static credentials supplied by the caller instead of the default chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitCredentials {
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_session_token: Option<String>,
}

impl ExplicitCredentials {
    /// Combine optional credential parts.
    ///
    /// Empty strings count as absent. No key pair at all means "use the
    /// default chain" (`Ok(None)`); half a pair is an error.
    pub fn from_parts(
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
        session_token: Option<String>,
    ) -> Result<Option<Self>> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

        match (non_empty(access_key_id), non_empty(secret_access_key)) {
            (Some(aws_access_key_id), Some(aws_secret_access_key)) => Ok(Some(Self {
                aws_access_key_id,
                aws_secret_access_key,
                aws_session_token: non_empty(session_token),
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ManagerError::validation(
                "aws_secret_access_key is required when aws_access_key_id is given",
            )),
            (None, Some(_)) => Err(ManagerError::validation(
                "aws_access_key_id is required when aws_secret_access_key is given",
            )),
        }
    }
}

/// GET and PUT URLs for one batch job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrls {
    /// Presigned GET for the input archive
    pub input_url: String,
    /// Presigned PUT for the results
    pub output_url: String,
    pub input_key: String,
    pub output_key: String,
    pub expires_in: u64,
}

/// Resolve the requested lifetime, defaulting to seven days
pub fn resolve_expires_in(expires_in: Option<u64>) -> Result<u64> {
    match expires_in.unwrap_or(MAX_EXPIRES_IN) {
        0 => Err(ManagerError::validation("expires_in must be at least 1 second")),
        secs if secs > MAX_EXPIRES_IN => Err(ManagerError::validation(format!(
            "expires_in must not exceed {} seconds (7 days)",
            MAX_EXPIRES_IN
        ))),
        secs => Ok(secs),
    }
}

/// `outputs/{basename(input_key)}/{now}.tar.gz` in local time
pub fn default_output_key(input_key: &str) -> String {
    output_key_at(input_key, Local::now().naive_local())
}

/// Output key for `input_key` stamped with `at`
pub fn output_key_at(input_key: &str, at: NaiveDateTime) -> String {
    let name = input_key.rsplit('/').next().unwrap_or(input_key);
    format!(
        "outputs/{}/{}.tar.gz",
        name,
        at.format("%Y-%m-%dT%H:%M:%S%.6f")
    )
}

/// The caller's output key, or the default one when missing or empty
pub fn resolve_output_key(input_key: &str, output_key: Option<&str>) -> String {
    match output_key {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => default_output_key(input_key),
    }
}
