use std::io;

use anyhow::{Context, Result};
use csv_normalizer::pipeline::{normalize_reader_to_writer, NormalizeOptions};
use tracing_subscriber::{fmt, EnvFilter};

/// Reads CSV from stdin, writes normalized CSV to stdout, reports dropped rows on stderr.
fn main() -> Result<()> {
    // Logs share stderr with drop diagnostics, so stay quiet unless RUST_LOG asks otherwise.
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(env).with_writer(io::stderr).init();

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    normalize_reader_to_writer(stdin, stdout, &NormalizeOptions::default())
        .context("normalizing stdin to stdout")?;
    Ok(())
}
