//! HTTP route modules
//!
//! - `/`: dashboard page
//! - `/api/health`: batch API and S3 status
//! - `/api/generate-presigned-urls`, `/api/validate-s3-key/..`: storage helpers
//! - `/api/batches..`: batch API proxy

pub mod batches;
pub mod health;
pub mod storage;

use super::handlers;
use actix_web::web;

/// Register every dashboard route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .configure(health::configure_routes)
            .configure(storage::configure_routes)
            .configure(batches::configure_routes),
    );
}
