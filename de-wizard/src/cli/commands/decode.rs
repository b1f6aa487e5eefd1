use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::spreadsheet::decode_file;

#[derive(Args)]
pub struct DecodeArgs {
    /// CSV or Excel file to decode
    pub file: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Dry run: show exactly what would be submitted
pub async fn handle_decode_command(args: DecodeArgs) -> Result<()> {
    let records = decode_file(&args.file)
        .await
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{}", json);

    let fields: usize = records.iter().map(|de| de.fields.len()).sum();
    eprintln!(
        "{} {} data extensions, {} fields",
        "✓".green(),
        records.len().to_string().bold(),
        fields
    );
    Ok(())
}
