//! Health endpoint

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Status of the dashboard's dependencies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// `healthy`, `unhealthy` or `error: <reason>`
    pub batch_api_status: String,
    pub batch_api_url: String,
    /// Whether HeadBucket on the default bucket succeeded
    pub s3_access: bool,
    /// Region of the S3 client, `unknown` without bucket access
    pub aws_region: String,
    /// Local time, ISO-8601 with microseconds
    pub timestamp: String,
}

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// `GET /api/health`
///
/// Always answers 200; failures show up in the report fields.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let bucket = state.storage.default_bucket();
    let (batch_api_status, s3_access) = futures::join!(
        state.batch_api.health(),
        state.storage.bucket_accessible(bucket)
    );

    let aws_region = if s3_access {
        state
            .storage
            .region()
            .unwrap_or_else(|| "unknown".to_string())
    } else {
        "unknown".to_string()
    };

    HttpResponse::Ok().json(HealthReport {
        batch_api_status: batch_api_status.to_string(),
        batch_api_url: state.batch_api.base_url().to_string(),
        s3_access,
        aws_region,
        timestamp: chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
    })
}
