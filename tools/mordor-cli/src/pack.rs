//! Pack command - encode a JSON document into an MDATA file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mordor_data::{Codec, MordorConfig, encode_json};

use crate::common;

/// Arguments for the pack command
#[derive(Args)]
pub struct PackArgs {
    /// JSON document produced by `mordor dump`
    pub json: PathBuf,

    /// File kind (1-15); inferred from an MDATA<n> file name when omitted
    #[arg(short, long)]
    pub kind: Option<u8>,

    /// Output file (default: MDATA<n>.MDR next to the JSON)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Execute the pack command
pub fn execute(args: PackArgs, config: &MordorConfig) -> Result<()> {
    let kind = common::resolve_kind(&args.json, args.kind)?;
    let text = std::fs::read_to_string(&args.json)
        .with_context(|| format!("Failed to read {}", args.json.display()))?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.json.display()))?;

    let codec = Codec::new(config.codec.clone());
    let bytes = encode_json(&codec, kind, &document)
        .with_context(|| format!("Failed to encode {} as {}", args.json.display(), kind))?;

    let out = args.out.unwrap_or_else(|| args.json.with_file_name(kind.file_name()));
    std::fs::write(&out, &bytes).with_context(|| format!("Failed to write {}", out.display()))?;

    println!("Packed {} ({} bytes) to {}", kind, bytes.len(), out.display());
    Ok(())
}
