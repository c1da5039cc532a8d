//! HTTP server implementation
//!
//! The dashboard backend: serves the UI, generates presigned URLs and proxies
//! the external batch API.

pub mod routes;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;


pub use builder::{ServerBuilder, run_server};
pub use server::{HttpServer, create_app};
pub use state::AppState;
