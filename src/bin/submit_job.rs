//! submit-job - presign a batch input/output pair and submit it

use batch_manager::Config;
use batch_manager::core::batch::CHAT_COMPLETIONS_ENDPOINT;
use batch_manager::core::batch_api::{BatchApiClient, CompletionWindow, CreateBatchRequest};
use batch_manager::storage::StorageClient;
use batch_manager::utils::error::Result;
use batch_manager::utils::logging::init_logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Submit a packaged batch stored in S3 to the batch API
#[derive(Parser, Debug)]
#[command(name = "submit-job")]
#[command(version, about, long_about = None)]
struct Cli {
    /// S3 bucket holding the batch input
    #[arg(long)]
    bucket: String,

    /// S3 key of the batch input
    #[arg(long)]
    key: String,

    /// Scheme, host and port of the batch API, e.g. http://localhost:8000
    #[arg(long)]
    host: String,

    /// Model recorded in the batch metadata [default: from config]
    #[arg(long)]
    model: Option<String>,

    /// Endpoint every job targets
    #[arg(long, default_value = CHAT_COMPLETIONS_ENDPOINT)]
    endpoint: String,

    /// Time frame for completion (6h, 12h, 24h or 7d)
    #[arg(long, default_value = "24h")]
    completion_window: CompletionWindow,

    /// Identifier for the batch
    #[arg(long)]
    batch_id: Option<String>,

    /// YAML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).await?;
    init_logging(config.logging());
    config.manager.batch_api.base_url = cli.host;

    let storage = StorageClient::new(config.storage()).await?;
    let urls = storage
        .generate_presigned_urls(&cli.bucket, &cli.key, None, None)
        .await?;
    info!("Presigned input {} and output {}", urls.input_key, urls.output_key);

    let model = cli
        .model
        .unwrap_or_else(|| config.packaging().model.clone());
    let mut request = CreateBatchRequest::new(urls.input_url, urls.output_url.clone())
        .with_endpoint(cli.endpoint)
        .with_completion_window(cli.completion_window)
        .with_metadata("model", model)
        .with_metadata("output_file_id", urls.output_url);
    if let Some(batch_id) = cli.batch_id {
        request = request.with_batch_id(batch_id);
    }

    let client = BatchApiClient::new(config.batch_api())?;
    let response = client.create_batch(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
