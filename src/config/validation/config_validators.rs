//! Configuration validators
//!
//! Validation implementations for every section of [`ManagerConfig`].

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use url::Url;

/// Check that a URL parses and uses http or https
pub fn validate_http_url(url_str: &str, context: &str) -> Result<(), String> {
    let url =
        Url::parse(url_str).map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}

impl Validate for ManagerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating batch manager configuration");

        self.server.validate()?;
        self.server.cors.validate()?;
        self.batch_api.validate()?;
        self.storage.validate()?;
        self.packaging.validate()?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
            if workers > 1000 {
                return Err("Worker count seems too high (>1000)".to_string());
            }
        }

        if self.timeout == 0 {
            return Err("Server timeout must be greater than 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchApiConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.base_url, "Batch API URL")?;

        if self.timeout == 0 {
            return Err("Batch API timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for S3Config {
    fn validate(&self) -> Result<(), String> {
        if self.default_bucket.is_empty() {
            return Err("Default S3 bucket cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            validate_http_url(endpoint, "S3 endpoint")?;
        }

        if self.expires_in == 0 || self.expires_in > default_expires_in() {
            return Err(format!(
                "Presigned URL expiry must be between 1 and {} seconds",
                default_expires_in()
            ));
        }

        Ok(())
    }
}

impl Validate for PackagingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }
}
