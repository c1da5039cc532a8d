//! S3 helper endpoints

use crate::server::state::AppState;
use crate::storage::{ExplicitCredentials, PresignedUrls, StorageClient};
use crate::utils::error::{ManagerError, Result};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of `POST /api/generate-presigned-urls`
#[derive(Debug, Clone, Deserialize)]
pub struct PresignRequest {
    /// Defaults to the configured bucket
    #[serde(default)]
    pub bucket: Option<String>,
    pub input_key: String,
    #[serde(default)]
    pub output_key: Option<String>,
    #[serde(default)]
    pub credentials: Option<CredentialsPayload>,
    /// Defaults to the configured lifetime
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Credential fields as sent by the dashboard; any of them may be blank
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsPayload {
    #[serde(default)]
    pub aws_access_key_id: Option<String>,
    #[serde(default)]
    pub aws_secret_access_key: Option<String>,
    #[serde(default)]
    pub aws_session_token: Option<String>,
}

/// Presigned URLs plus the bucket they point into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignResponse {
    #[serde(flatten)]
    pub urls: PresignedUrls,
    pub bucket: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeyQuery {
    pub bucket: Option<String>,
}

/// Result of `GET /api/validate-s3-key/{key}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyStatus {
    pub exists: bool,
    pub bucket: String,
    pub key: String,
}

/// Configure storage routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/generate-presigned-urls",
        web::post().to(generate_presigned_urls),
    )
    .route("/validate-s3-key/{key:.*}", web::get().to(validate_s3_key));
}

fn bucket_or_default(bucket: Option<String>, state: &AppState) -> String {
    bucket
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| state.storage.default_bucket().to_string())
}

/// `POST /api/generate-presigned-urls`
pub async fn generate_presigned_urls(
    state: web::Data<AppState>,
    body: web::Json<PresignRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    let bucket = bucket_or_default(request.bucket, &state);
    let expires_in = request
        .expires_in
        .unwrap_or(state.config.storage().expires_in);

    let credentials = match request.credentials {
        Some(c) => ExplicitCredentials::from_parts(
            c.aws_access_key_id,
            c.aws_secret_access_key,
            c.aws_session_token,
        )?,
        None => None,
    };

    let urls = match credentials {
        Some(credentials) => {
            StorageClient::with_credentials(state.config.storage(), &credentials)
                .generate_presigned_urls(
                    &bucket,
                    &request.input_key,
                    request.output_key.as_deref(),
                    Some(expires_in),
                )
                .await?
        }
        None => {
            state
                .storage
                .generate_presigned_urls(
                    &bucket,
                    &request.input_key,
                    request.output_key.as_deref(),
                    Some(expires_in),
                )
                .await?
        }
    };

    info!(
        "Generated presigned URLs for s3://{}/{}",
        bucket, urls.input_key
    );
    Ok(HttpResponse::Ok().json(PresignResponse { urls, bucket }))
}

/// `GET /api/validate-s3-key/{key}?bucket=`
pub async fn validate_s3_key(
    state: web::Data<AppState>,
    key: web::Path<String>,
    query: web::Query<KeyQuery>,
) -> Result<HttpResponse> {
    let key = key.into_inner();
    if key.is_empty() {
        return Err(ManagerError::bad_request("S3 key is required"));
    }
    let bucket = bucket_or_default(query.into_inner().bucket, &state);

    let exists = state.storage.object_exists(&bucket, &key).await;
    Ok(HttpResponse::Ok().json(KeyStatus {
        exists,
        bucket,
        key,
    }))
}
