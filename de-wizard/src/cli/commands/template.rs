use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::spreadsheet::{TemplateFormat, write_template};

#[derive(Args)]
pub struct TemplateArgs {
    /// Output path (defaults to data_extensions_template.<format>)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = TemplateFormat::Csv)]
    pub format: TemplateFormat,
}

pub fn handle_template_command(args: TemplateArgs) -> Result<()> {
    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(args.format.default_file_name()));

    write_template(&path, args.format)?;
    println!("{} Template written to {}", "✓".green(), path.display().to_string().cyan());
    Ok(())
}
