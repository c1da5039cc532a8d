//! batch-manager - dashboard server for batch inference jobs
//!
//! Serves the dashboard UI and proxies the external batch API.

#![allow(missing_docs)]

use batch_manager::utils::logging::init_logging;
use batch_manager::{Config, server};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Dashboard for batch inference jobs
#[derive(Parser, Debug)]
#[command(name = "batch-manager")]
#[command(version, about, long_about = None)]
struct Cli {
    /// YAML configuration file (defaults to config/batch-manager.yaml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = cli.host {
        config.manager.server.host = host;
    }
    if let Some(port) = cli.port {
        config.manager.server.port = port;
    }

    init_logging(config.logging());

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
