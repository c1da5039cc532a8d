//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and the application factory.

use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{ManagerError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with clients built from `config`
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let state = AppState::from_config(config.clone()).await?;
        Ok(Self::with_state(state))
    }

    /// Create a server around an existing state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.server().clone(),
            state,
        }
    }

    /// Start the HTTP server and run until it is stopped
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {} ({} workers)", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new({
            let state = state.clone();
            move || create_app(state.clone())
        })
        .workers(workers)
        .client_request_timeout(Duration::from_secs(self.config.timeout))
        .bind(&bind_addr)
        .map_err(|e| format_bind_error(e, &bind_addr))?
        .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| ManagerError::internal(format!("Server error: {}", e)))?;

        drop(state);
        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Create the Actix-web application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    debug!("Setting up routes and middleware");

    let server_config = state.config.server().clone();
    let cors = build_cors(&server_config);
    let json_config = web::JsonConfig::default()
        .limit(server_config.max_body_size)
        .error_handler(|err, _req| ManagerError::bad_request(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ManagerError::bad_request(err.to_string()).into());

    App::new()
        .app_data(state)
        .app_data(json_config)
        .app_data(query_config)
        .wrap(cors)
        .wrap(Logger::default())
        .wrap(DefaultHeaders::new().add(("Server", "batch-manager")))
        .configure(routes::configure_routes)
        .configure(|cfg| configure_static(cfg, &server_config.static_dir))
}

fn build_cors(config: &ServerConfig) -> Cors {
    let cors_config = &config.cors;
    let mut cors = Cors::default();

    if !cors_config.enabled {
        return cors;
    }

    if cors_config.allows_all_origins() {
        cors = cors.allow_any_origin();
        cors_config.validate().unwrap_or_else(|e| {
            warn!(error = %e, "CORS Configuration Warning");
        });
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<actix_web::http::Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    let headers: Vec<actix_web::http::header::HeaderName> = cors_config
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    if !headers.is_empty() {
        cors = cors.allowed_headers(headers);
    }

    cors = cors.max_age(cors_config.max_age as usize);

    if cors_config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

/// Serve `dir` under `/static` when it exists
fn configure_static(cfg: &mut web::ServiceConfig, dir: &str) {
    if Path::new(dir).is_dir() {
        cfg.service(actix_files::Files::new("/static", dir));
    } else {
        debug!("Static directory {} not found, /static disabled", dir);
    }
}

fn format_bind_error(e: std::io::Error, addr: &str) -> ManagerError {
    if e.kind() == std::io::ErrorKind::AddrInUse {
        ManagerError::internal(format!(
            "Address {} is already in use; pick another port with --port or BATCH_MANAGER_PORT",
            addr
        ))
    } else {
        ManagerError::internal(format!("Failed to bind to {}: {}", addr, e))
    }
}
