//! HTTP response handling for errors

use super::types::ManagerError;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

impl ManagerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ManagerError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            ManagerError::HttpClient(_) => (StatusCode::BAD_GATEWAY, "BATCH_API_UNREACHABLE"),
            ManagerError::Serialization(_) => (StatusCode::BAD_REQUEST, "SERIALIZATION_ERROR"),
            ManagerError::Yaml(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            ManagerError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            ManagerError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ManagerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ManagerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ManagerError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ManagerError::Upstream { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "UPSTREAM_ERROR",
            ),
            ManagerError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "BATCH_API_TIMEOUT"),
            ManagerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl ResponseError for ManagerError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();
        if status_code.is_server_error() && !self.is_client_error() {
            error!("Request failed: {}", self);
        }

        // Remote failures are relayed as-is: same status, same body.
        if let ManagerError::Upstream { body, .. } = self {
            let content_type = if serde_json::from_str::<serde_json::Value>(body).is_ok() {
                ContentType::json()
            } else {
                ContentType::plaintext()
            };
            return HttpResponse::build(status_code)
                .insert_header(content_type)
                .body(body.clone());
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_string(),
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
