//! Service entry point.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use snaplink::config;
use snaplink::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; deployed environments set variables directly.
    let _ = dotenvy::dotenv();

    let config = config::load_from_env()?;

    init_tracing(&config.log_level, &config.log_format);

    config.print_summary();

    server::run(config).await
}

/// Initializes the tracing subscriber with the configured level and format.
///
/// `RUST_LOG` takes priority over the configured level when set.
fn init_tracing(log_level: &str, log_format: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}
