//! scel-maker binary entry point.
//!
//! This is a thin wrapper around the scel-maker library that:
//! 1. Initializes logging
//! 2. Parses command-line arguments
//! 3. Runs the conversion
//!
//! Any error ends the process with a non-zero exit code.

use anyhow::{Context, Result};
use scel_maker::{MakerConfig, convert};

fn main() -> Result<()> {
    // Log to stderr so nothing but clap's usage text reaches stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = MakerConfig::from_args();

    let conversion = convert(&config)
        .with_context(|| format!("Failed to convert {}", config.input.display()))?;

    tracing::info!(
        "Wrote {} ({} words, checksum {})",
        conversion.output.display(),
        conversion.report.summary.word_count,
        conversion.report.checksum
    );

    Ok(())
}
