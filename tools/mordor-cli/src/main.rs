//! Mordor CLI - work with Mordor: The Depths of Dejenol MDATA files
//!
//! # Commands
//!
//! - `mordor inspect` - Summarize one MDATA file
//! - `mordor dump` - Decode an MDATA file to JSON
//! - `mordor pack` - Encode a JSON document back into an MDATA file
//! - `mordor verify` - Decode and re-encode every MDATA file in a directory
//!
//! # Usage
//!
//! ```bash
//! # What is in the monster catalog?
//! mordor inspect MDATA5.MDR
//!
//! # Edit a character by hand
//! mordor dump MDATA4.MDR --out characters.json
//! mordor pack characters.json --kind 4 --out MDATA4.MDR
//!
//! # Check that a whole save round-trips
//! mordor verify ~/games/mordor
//! ```
//!
//! Settings come from `mordor.toml` in the config directory, or `--config`.

mod common;
mod dump;
mod inspect;
mod pack;
mod verify;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Mordor CLI - work with MDATA files
#[derive(Parser)]
#[command(name = "mordor")]
#[command(about = "Inspect, dump, pack and verify Mordor MDATA files")]
#[command(version)]
struct Cli {
    /// Configuration file (default: mordor.toml in the config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log codec details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one MDATA file
    Inspect(inspect::InspectArgs),

    /// Decode an MDATA file to JSON
    Dump(dump::DumpArgs),

    /// Encode a JSON document into an MDATA file
    Pack(pack::PackArgs),

    /// Decode and re-encode every MDATA file in a directory
    Verify(verify::VerifyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = mordor_data::config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect(args) => inspect::execute(args, &config),
        Commands::Dump(args) => dump::execute(args, &config),
        Commands::Pack(args) => pack::execute(args, &config),
        Commands::Verify(args) => verify::execute(args, &config),
    }
}
