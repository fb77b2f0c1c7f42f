//! Inspect command - summarize one MDATA file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mordor_data::{Codec, MordorConfig, RecordLength, Value, schema};

use crate::common;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// MDATA file to inspect
    pub file: PathBuf,

    /// File kind (1-15); inferred from an MDATA<n> file name when omitted
    #[arg(short, long)]
    pub kind: Option<u8>,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs, config: &MordorConfig) -> Result<()> {
    let codec = Codec::new(config.codec.clone());
    let decoded = common::decode_file(&codec, &args.file, args.kind)?;
    let schema = schema::schema(decoded.kind);

    println!("=== {} ===", decoded.kind);
    println!("  File: {}", args.file.display());
    match schema.record_length {
        RecordLength::Fixed(len) => println!("  Record length: {len} bytes"),
        RecordLength::Variable => println!("  Record length: variable"),
    }
    println!("  Layout: {}", schema.layout.name);
    println!();

    for (name, value) in decoded.root.iter() {
        println!("  {name:<24} {}", summarize(value));
    }

    if !decoded.residue.is_empty() {
        println!();
        println!("  {} slots carry non-zero slack", decoded.residue.len());
    }
    Ok(())
}

fn summarize(value: &Value) -> String {
    match value {
        Value::Text(s) => format!("{s:?}"),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Float32(v) => v.to_string(),
        Value::Bytes(bytes) => format!("{} reserved bytes", bytes.len()),
        Value::List(items) => match items.first() {
            Some(Value::Record(_)) => format!("{} records", items.len()),
            _ => format!("{} values", items.len()),
        },
        Value::Record(record) => format!("record with {} fields", record.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summaries() {
        assert_eq!(summarize(&Value::Text("1.1".into())), "\"1.1\"");
        assert_eq!(summarize(&Value::Int16(-4)), "-4");
        assert_eq!(summarize(&Value::Bytes(vec![0; 36])), "36 reserved bytes");
        assert_eq!(summarize(&Value::List(vec![Value::Int16(1); 15])), "15 values");
        assert_eq!(summarize(&Value::List(Vec::new())), "0 values");
    }
}
