//! S3 client wrapper

use super::presign::{ExplicitCredentials, PresignedUrls, resolve_expires_in, resolve_output_key};
use crate::config::S3Config;
use crate::utils::error::{ManagerError, Result};
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;
use tracing::{debug, info};

/// Region used with explicit credentials when none is configured
pub const FALLBACK_REGION: &str = "us-east-1";

/// S3 access for presigning and existence probes
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: aws_sdk_s3::Client,
    default_bucket: String,
}

impl StorageClient {
    /// Client backed by the default AWS credential chain
    pub async fn new(config: &S3Config) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        let s3_config = builder.force_path_style(config.force_path_style).build();

        let client = Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            default_bucket: config.default_bucket.clone(),
        };
        info!(
            "S3 client initialized: bucket={}, region={}",
            client.default_bucket,
            client.region().as_deref().unwrap_or("unknown")
        );
        Ok(client)
    }

    /// Client signing with static credentials; no environment lookups
    pub fn with_credentials(config: &S3Config, credentials: &ExplicitCredentials) -> Self {
        let region = config
            .region
            .clone()
            .unwrap_or_else(|| FALLBACK_REGION.to_string());

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region))
            .credentials_provider(Credentials::new(
                credentials.aws_access_key_id.clone(),
                credentials.aws_secret_access_key.clone(),
                credentials.aws_session_token.clone(),
                None,
                "explicit",
            ))
            .force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        debug!("S3 client created with explicit credentials");
        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            default_bucket: config.default_bucket.clone(),
        }
    }

    /// Bucket used when a request does not name one
    pub fn default_bucket(&self) -> &str {
        &self.default_bucket
    }

    /// Region the client signs for, if one was resolved
    pub fn region(&self) -> Option<String> {
        self.client.config().region().map(|r| r.to_string())
    }

    /// Presign a GET for `input_key` and a PUT for the output key.
    ///
    /// A missing or empty `output_key` gets a timestamped default under
    /// `outputs/`; `expires_in` defaults to seven days.
    pub async fn generate_presigned_urls(
        &self,
        bucket: &str,
        input_key: &str,
        output_key: Option<&str>,
        expires_in: Option<u64>,
    ) -> Result<PresignedUrls> {
        if bucket.is_empty() {
            return Err(ManagerError::validation("bucket is required"));
        }
        if input_key.is_empty() {
            return Err(ManagerError::validation("input_key is required"));
        }

        let expires_in = resolve_expires_in(expires_in)?;
        let output_key = resolve_output_key(input_key, output_key);
        let presigning = PresigningConfig::expires_in(Duration::from_secs(expires_in))
            .map_err(|e| ManagerError::validation(format!("Invalid expiry: {}", e)))?;

        let input = self
            .client
            .get_object()
            .bucket(bucket)
            .key(input_key)
            .presigned(presigning.clone())
            .await
            .map_err(|e| {
                ManagerError::storage(format!(
                    "Failed to presign GET s3://{}/{}: {}",
                    bucket,
                    input_key,
                    DisplayErrorContext(e)
                ))
            })?;

        let output = self
            .client
            .put_object()
            .bucket(bucket)
            .key(&output_key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                ManagerError::storage(format!(
                    "Failed to presign PUT s3://{}/{}: {}",
                    bucket,
                    output_key,
                    DisplayErrorContext(e)
                ))
            })?;

        debug!(
            "Presigned s3://{}/{} -> {} ({}s)",
            bucket, input_key, output_key, expires_in
        );

        Ok(PresignedUrls {
            input_url: input.uri().to_string(),
            output_url: output.uri().to_string(),
            input_key: input_key.to_string(),
            output_key,
            expires_in,
        })
    }

    /// Whether `HeadBucket` succeeds; any failure counts as no access
    pub async fn bucket_accessible(&self, bucket: &str) -> bool {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => true,
            Err(e) => {
                debug!("HeadBucket {} failed: {}", bucket, DisplayErrorContext(e));
                false
            }
        }
    }

    /// Whether `HeadObject` succeeds; any failure counts as missing
    pub async fn object_exists(&self, bucket: &str, key: &str) -> bool {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => true,
            Err(e) => {
                debug!(
                    "HeadObject s3://{}/{} failed: {}",
                    bucket,
                    key,
                    DisplayErrorContext(e)
                );
                false
            }
        }
    }
}
