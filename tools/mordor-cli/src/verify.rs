//! Verify command - decode and re-encode every MDATA file in a directory

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mordor_data::save_game::verify_dir;
use mordor_data::{Codec, MordorConfig, VerifyOutcome};

/// Arguments for the verify command
#[derive(Args)]
pub struct VerifyArgs {
    /// Save directory (default: save_dir from the config, then the current directory)
    pub dir: Option<PathBuf>,
}

/// Execute the verify command
pub fn execute(args: VerifyArgs, config: &MordorConfig) -> Result<()> {
    let dir = args
        .dir
        .or_else(|| config.save_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let codec = Codec::new(config.codec.clone());

    let reports = verify_dir(&dir, &codec);
    if reports.is_empty() {
        anyhow::bail!("No MDATA files found in {}", dir.display());
    }

    println!("=== Verifying {} ===", dir.display());
    let mut failed = 0;
    for report in &reports {
        let status = match &report.outcome {
            VerifyOutcome::Identical => "identical".to_string(),
            VerifyOutcome::Normalized { first_difference } => {
                format!("normalized (first change at byte {first_difference})")
            }
            VerifyOutcome::Failed(reason) => {
                failed += 1;
                format!("FAILED: {reason}")
            }
        };
        println!("  {:<28} {:>8} bytes  {}", report.kind.to_string(), report.len, status);
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} files failed verification", reports.len());
    }
    println!("All {} files verified", reports.len());
    Ok(())
}
