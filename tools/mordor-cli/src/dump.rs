//! Dump command - decode an MDATA file to JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mordor_data::{Codec, MordorConfig};

use crate::common;

/// Arguments for the dump command
#[derive(Args)]
pub struct DumpArgs {
    /// MDATA file to decode
    pub file: PathBuf,

    /// File kind (1-15); inferred from an MDATA<n> file name when omitted
    #[arg(short, long)]
    pub kind: Option<u8>,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Single-line output
    #[arg(long)]
    pub compact: bool,
}

/// Execute the dump command
pub fn execute(args: DumpArgs, config: &MordorConfig) -> Result<()> {
    let codec = Codec::new(config.codec.clone());
    let decoded = common::decode_file(&codec, &args.file, args.kind)?;

    if !decoded.residue.is_empty() {
        tracing::warn!(
            slots = decoded.residue.len(),
            "slot slack is not part of the JSON; packing it back zero-fills those bytes"
        );
    }

    let json = if args.compact {
        serde_json::to_string(&decoded.root)?
    } else {
        serde_json::to_string_pretty(&decoded.root)?
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Dumped {} to {}", decoded.kind, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
