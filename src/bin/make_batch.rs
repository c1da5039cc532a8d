//! make-batch - package a directory of images into batch archives

use batch_manager::Config;
use batch_manager::core::batch::{
    BatchOptions, BatchSummary, EntryOrder, write_batches, write_batches_concurrent,
};
use batch_manager::utils::logging::init_logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Package every file of a directory into `batch-NNNNN.tar.gz` archives
#[derive(Parser, Debug)]
#[command(name = "make-batch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Prompt sent along with every image
    #[arg(long)]
    prompt: String,

    /// Directory containing the images
    #[arg(long, alias = "images_dir")]
    images_dir: PathBuf,

    /// How many images go into one archive
    #[arg(long, alias = "batch_size")]
    batch_size: usize,

    /// Model for every job [default: from config]
    #[arg(long)]
    model: Option<String>,

    /// Maximum response tokens for every job [default: from config]
    #[arg(long, alias = "max_tokens")]
    max_tokens: Option<u32>,

    /// Where archives are written (default: current directory)
    #[arg(long, alias = "output_dir")]
    output_dir: Option<PathBuf>,

    /// Keep the directory's native listing order instead of sorting by name
    #[arg(long)]
    native_order: bool,

    /// Number of archives written in parallel
    #[arg(long, short, default_value_t = 1)]
    jobs: usize,

    /// Do not print the archive paths
    #[arg(long, short)]
    quiet: bool,

    /// YAML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.logging());

    let mut options = BatchOptions::from_config(cli.prompt, config.packaging());
    if let Some(model) = cli.model {
        options = options.with_model(model);
    }
    if let Some(max_tokens) = cli.max_tokens {
        options = options.with_max_tokens(max_tokens);
    }
    if let Some(dir) = cli.output_dir {
        options = options.with_output_dir(dir);
    }
    if cli.native_order {
        options = options.with_entry_order(EntryOrder::Native);
    }

    let result = if cli.jobs > 1 {
        write_batches_concurrent(options, cli.images_dir, cli.batch_size, cli.jobs).await
    } else {
        write_batches(&options, &cli.images_dir, cli.batch_size)
    };

    match result {
        Ok(summary) => report(&summary, cli.quiet),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(summary: &BatchSummary, quiet: bool) -> ExitCode {
    if !quiet {
        for archive in &summary.archives {
            println!("written batch: {}", archive.display());
        }
    }

    for failure in &summary.failures {
        eprintln!("failed batch {:05}: {}", failure.group_index, failure.error);
    }

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
