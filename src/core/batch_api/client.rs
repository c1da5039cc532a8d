//! HTTP client for the external batch API

use crate::config::BatchApiConfig;
use crate::utils::error::{ManagerError, Result};
use crate::utils::truncate_string;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of probing `GET /health`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchApiHealth {
    Healthy,
    Unhealthy,
    /// The request itself failed
    Error(String),
}

impl BatchApiHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, BatchApiHealth::Healthy)
    }
}

impl fmt::Display for BatchApiHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchApiHealth::Healthy => f.write_str("healthy"),
            BatchApiHealth::Unhealthy => f.write_str("unhealthy"),
            BatchApiHealth::Error(e) => write!(f, "error: {}", e),
        }
    }
}

/// Client for the `/v1/batches` endpoints.
///
/// Owns its connection pool; clone it to share between tasks.
#[derive(Debug, Clone)]
pub struct BatchApiClient {
    base_url: Url,
    http: Client,
}

impl BatchApiClient {
    /// Build a client for the configured base URL and timeout
    pub fn new(config: &BatchApiConfig) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.timeout_duration())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ManagerError::config(format!("Invalid batch API URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ManagerError::config(format!(
                "Batch API URL cannot be used as a base: {}",
                base_url
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(concat!("batch-manager/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!("Batch API client ready for {}", base_url);
        Ok(Self { base_url, http })
    }

    /// Base URL as configured, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Probe `GET /health`; never fails
    pub async fn health(&self) -> BatchApiHealth {
        let url = match self.url(&["health"]) {
            Ok(url) => url,
            Err(e) => return BatchApiHealth::Error(e.to_string()),
        };

        match self.http.get(url).send().await {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => BatchApiHealth::Healthy,
            Ok(resp) => {
                debug!("Batch API health returned {}", resp.status());
                BatchApiHealth::Unhealthy
            }
            Err(e) => {
                warn!("Batch API health check failed: {}", e);
                BatchApiHealth::Error(e.to_string())
            }
        }
    }

    /// `GET /v1/batches?limit=&after=`
    pub async fn list_batches(&self, limit: u32, after: Option<&str>) -> Result<Value> {
        let mut url = self.url(&["v1", "batches"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(after) = after {
                query.append_pair("after", after);
            }
        }

        let resp = self.http.get(url).send().await?;
        Self::into_json(resp).await
    }

    /// `GET /v1/batches/{id}`
    pub async fn get_batch(&self, batch_id: &str) -> Result<Value> {
        let url = self.url(&["v1", "batches", batch_id])?;
        let resp = self.http.get(url).send().await?;
        Self::into_json(resp).await
    }

    /// `POST /v1/batches` with `payload` as the JSON body
    pub async fn create_batch<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Value> {
        let url = self.url(&["v1", "batches"])?;
        let resp = self.http.post(url).json(payload).send().await?;
        Self::into_json(resp).await
    }

    /// `POST /v1/batches/{id}/cancel`
    pub async fn cancel_batch(&self, batch_id: &str) -> Result<Value> {
        let url = self.url(&["v1", "batches", batch_id, "cancel"])?;
        let resp = self.http.post(url).send().await?;
        Self::into_json(resp).await
    }

    /// `POST /v1/batches/{id}/retry`
    pub async fn retry_batch(&self, batch_id: &str) -> Result<Value> {
        let url = self.url(&["v1", "batches", batch_id, "retry"])?;
        let resp = self.http.post(url).send().await?;
        Self::into_json(resp).await
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ManagerError::config("Batch API URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Non-2xx responses become [`ManagerError::Upstream`] with the body as-is
    async fn into_json(resp: Response) -> Result<Value> {
        let status = resp.status();
        let url = resp.url().clone();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!(
                "Batch API {} returned {}: {}",
                url.path(),
                status,
                truncate_string(&body, 200)
            );
            return Err(ManagerError::upstream(status.as_u16(), body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
