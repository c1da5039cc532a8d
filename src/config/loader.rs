//! Environment overrides
//!
//! Environment variables win over the YAML file. Lookups go through a closure
//! so the mapping can be exercised without touching the process environment.

use super::models::*;
use crate::utils::error::{ManagerError, Result};
use std::str::FromStr;
use tracing::debug;

impl ManagerConfig {
    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(crate::utils::env_var)
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BATCH_MANAGER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BATCH_MANAGER_PORT") {
            self.server.port = parse_var("BATCH_MANAGER_PORT", &port)?;
        }
        if let Some(workers) = lookup("BATCH_MANAGER_WORKERS") {
            self.server.workers = Some(parse_var("BATCH_MANAGER_WORKERS", &workers)?);
        }

        if let Some(url) = lookup("BATCH_API_URL") {
            self.batch_api.base_url = url;
        }
        if let Some(timeout) = lookup("BATCH_API_TIMEOUT") {
            self.batch_api.timeout = parse_var("BATCH_API_TIMEOUT", &timeout)?;
        }

        if let Some(bucket) = lookup("S3_BUCKET_NAME") {
            self.storage.default_bucket = bucket;
        }
        if let Some(region) = lookup("AWS_REGION") {
            self.storage.region = Some(region);
        }
        if let Some(endpoint) = lookup("S3_ENDPOINT_URL") {
            self.storage.endpoint = Some(endpoint);
        }
        if let Some(path_style) = lookup("S3_FORCE_PATH_STYLE") {
            self.storage.force_path_style = parse_bool(&path_style);
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.json = format.eq_ignore_ascii_case("json");
        }

        debug!("Environment overrides applied");
        Ok(self)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| ManagerError::Config(format!("Invalid {}: {}", key, e)))
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
