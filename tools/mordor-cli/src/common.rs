//! Helpers shared by the subcommands

use std::path::Path;

use anyhow::{Context, Result};
use mordor_data::{Codec, DecodedFile, FileKind};

/// Resolve the file kind from an explicit id or the `MDATA<n>` file name
pub fn resolve_kind(path: &Path, explicit: Option<u8>) -> Result<FileKind> {
    if let Some(id) = explicit {
        return Ok(FileKind::try_from(id)?);
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(FileKind::from_file_name)
        .with_context(|| {
            format!(
                "cannot tell the file kind of {}; pass --kind 1..15",
                path.display()
            )
        })
}

/// Read and decode one MDATA file
pub fn decode_file(codec: &Codec, path: &Path, kind: Option<u8>) -> Result<DecodedFile> {
    let kind = resolve_kind(path, kind)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), %kind, bytes = bytes.len(), "decoding");
    codec
        .decode_bytes(kind, &bytes)
        .with_context(|| format!("Failed to decode {}", path.display()))
}
