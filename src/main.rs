//! Recoder - Main Entry Point
//!
//! Rewrites ISO-8859-1 files under the configured root as UTF-8.

use std::io;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recoder::{EncodingNormalizer, NormalizerConfig};

fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    init_tracing();

    let config = NormalizerConfig::load().context("Failed to load configuration")?;

    info!("Starting Recoder v{}", env!("CARGO_PKG_VERSION"));
    info!(root = %config.root.display(), probe = ?config.probe, marker = %config.marker, "Configuration loaded");

    let normalizer = EncodingNormalizer::from_config(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = normalizer
        .run(&mut out)
        .with_context(|| format!("Normalization of {} aborted", config.root.display()))?;

    info!(report = %serde_json::to_string(&report)?, "Run report");

    Ok(())
}

/// Logs go to stderr so stdout only carries the conversion lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "recoder=info".into()),
    );

    let json = std::env::var("RECODER_LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
