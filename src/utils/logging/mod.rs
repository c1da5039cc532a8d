//! Logging setup
//!
//! Every binary installs one `tracing` subscriber at startup through
//! [`init_logging`]. Filtering follows `RUST_LOG` when set. Log lines go to
//! stderr; stdout belongs to the command-line tools' own output.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "batch_manager=info,actix_web=info";

/// Build the env filter, preferring `RUST_LOG` over the configured level
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = match config.level.as_deref() {
            Some(level) => format!("batch_manager={},actix_web=info", level),
            None => DEFAULT_FILTER.to_string(),
        };
        EnvFilter::new(directives)
    })
}

/// Install the global subscriber.
///
/// Calling this twice is harmless: the second call is ignored.
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_filter(config);

    let result = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
