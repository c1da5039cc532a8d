//! presign - generate presigned S3 URLs for a batch job

use batch_manager::Config;
use batch_manager::storage::{ExplicitCredentials, MAX_EXPIRES_IN, PresignedUrls, StorageClient};
use batch_manager::utils::error::Result;
use batch_manager::utils::logging::init_logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate a GET URL for a batch input and a PUT URL for its output
#[derive(Parser, Debug)]
#[command(name = "presign")]
#[command(version, about, long_about = None)]
struct Cli {
    /// S3 bucket name
    #[arg(long)]
    bucket: String,

    /// S3 key of the input archive
    #[arg(long)]
    input_key: String,

    /// S3 key for the output (default: outputs/<input name>/<timestamp>.tar.gz)
    #[arg(long)]
    output_key: Option<String>,

    /// AWS access key id (default credential chain when omitted)
    #[arg(long)]
    aws_access_key_id: Option<String>,

    /// AWS secret access key (required with --aws-access-key-id)
    #[arg(long)]
    aws_secret_access_key: Option<String>,

    /// AWS session token for temporary credentials
    #[arg(long)]
    aws_session_token: Option<String>,

    /// URL lifetime in seconds
    #[arg(long, default_value_t = MAX_EXPIRES_IN)]
    expires_in: u64,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Endpoint of an S3-compatible service
    #[arg(long, env = "S3_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

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
            eprintln!("Error generating presigned URLs: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).await?;
    init_logging(config.logging());

    if cli.region.is_some() {
        config.manager.storage.region = cli.region;
    }
    if cli.endpoint_url.is_some() {
        config.manager.storage.endpoint = cli.endpoint_url;
        config.manager.storage.force_path_style = true;
    }

    let credentials = ExplicitCredentials::from_parts(
        cli.aws_access_key_id,
        cli.aws_secret_access_key,
        cli.aws_session_token,
    )?;
    let client = match credentials {
        Some(credentials) => StorageClient::with_credentials(config.storage(), &credentials),
        None => StorageClient::new(config.storage()).await?,
    };

    let urls = client
        .generate_presigned_urls(
            &cli.bucket,
            &cli.input_key,
            cli.output_key.as_deref(),
            Some(cli.expires_in),
        )
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&urls)?);
    } else {
        print_urls(&urls);
    }
    Ok(())
}

fn print_urls(urls: &PresignedUrls) {
    println!("S3 Presigned URLs generated successfully:");
    println!("Input URL (GET): {}", urls.input_url);
    println!("Output URL (PUT): {}", urls.output_url);
    println!("Input Key: {}", urls.input_key);
    println!("Output Key: {}", urls.output_key);
    println!("Expires in: {} seconds", urls.expires_in);
}
