//! Atoll quoting agent - entry point.
//!
//! Speaks the harness line protocol: one JSON snapshot per line on stdin,
//! one JSON response per line on stdout. Logs and diagnostics go to stderr
//! so the protocol channel stays clean.

use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::{error, info};

use atoll_agent::{Agent, AppConfig, CycleOutput};
use atoll_feed::CycleSnapshot;

/// Atoll quoting agent
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via ATOLL_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    atoll_telemetry::init_logging()?;

    info!("Starting Atoll agent v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > ATOLL_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("ATOLL_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let config = AppConfig::from_file(&config_path)?;
    info!(products = config.products.len(), "Configuration loaded");

    let mut agent = Agent::new(config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        // A malformed snapshot still gets an (empty) response so the
        // harness never stalls waiting for a line.
        let output = match CycleSnapshot::from_json(&line) {
            Ok(snapshot) => agent.run_cycle(&snapshot),
            Err(error) => {
                error!(%error, "malformed snapshot line");
                CycleOutput::empty()
            }
        };

        serde_json::to_writer(&mut out, &output)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    info!("Input closed, shutting down");
    Ok(())
}
