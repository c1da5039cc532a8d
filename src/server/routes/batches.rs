//! Batch API proxy endpoints
//!
//! Each handler forwards to the external batch API. Remote failures come back
//! with the remote status code and body untouched.

use crate::core::batch_api::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, validate_batch_request};
use crate::server::state::AppState;
use crate::utils::error::{ManagerError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Query of `GET /api/batches`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub after: Option<String>,
}

impl ListQuery {
    /// Page size, checked against `1..=500`
    pub fn limit(&self) -> Result<u32> {
        match self.limit {
            None => Ok(DEFAULT_LIST_LIMIT),
            Some(limit) if (1..=MAX_LIST_LIMIT).contains(&limit) => Ok(limit),
            Some(limit) => Err(ManagerError::validation(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIST_LIMIT, limit
            ))),
        }
    }
}

/// Configure batch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/batches")
            .route("", web::get().to(list_batches))
            .route("", web::post().to(create_batch))
            .route("/{batch_id}", web::get().to(get_batch))
            .route("/{batch_id}/cancel", web::post().to(cancel_batch))
            .route("/{batch_id}/retry", web::post().to(retry_batch)),
    );
}

/// `GET /api/batches?limit=&after=`
pub async fn list_batches(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let limit = query.limit()?;
    debug!("Listing batches (limit={}, after={:?})", limit, query.after);

    let batches = state
        .batch_api
        .list_batches(limit, query.after.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(batches))
}

/// `GET /api/batches/{batch_id}`
pub async fn get_batch(
    state: web::Data<AppState>,
    batch_id: web::Path<String>,
) -> Result<HttpResponse> {
    let batch = state.batch_api.get_batch(&batch_id).await?;
    Ok(HttpResponse::Ok().json(batch))
}

/// `POST /api/batches`
///
/// The payload is validated locally and rejected with 400 before anything is
/// sent to the batch API.
pub async fn create_batch(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let payload = body.into_inner();
    validate_batch_request(&payload)?;

    let created = state.batch_api.create_batch(&payload).await?;
    let batch_id = payload
        .get("batch_id")
        .and_then(Value::as_str)
        .unwrap_or_default();
    info!("Created batch {}", batch_id);
    Ok(HttpResponse::Ok().json(created))
}

/// `POST /api/batches/{batch_id}/cancel`
pub async fn cancel_batch(
    state: web::Data<AppState>,
    batch_id: web::Path<String>,
) -> Result<HttpResponse> {
    let result = state.batch_api.cancel_batch(&batch_id).await?;
    info!("Cancelled batch {}", batch_id);
    Ok(HttpResponse::Ok().json(result))
}

/// `POST /api/batches/{batch_id}/retry`
pub async fn retry_batch(
    state: web::Data<AppState>,
    batch_id: web::Path<String>,
) -> Result<HttpResponse> {
    let result = state.batch_api.retry_batch(&batch_id).await?;
    info!("Retried batch {}", batch_id);
    Ok(HttpResponse::Ok().json(result))
}
