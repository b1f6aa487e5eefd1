//! Blank upload template (header row only)

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use rust_xlsxwriter::Workbook;

use super::schema::{DATA_EXTENSION_COLUMNS, FieldAttribute};

/// Sheet name used for the XLSX template
pub const TEMPLATE_SHEET_NAME: &str = "DataExtensions";

/// Output format of the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TemplateFormat {
    #[default]
    Csv,
    Xlsx,
}

impl TemplateFormat {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            TemplateFormat::Csv => "data_extensions_template.csv",
            TemplateFormat::Xlsx => "data_extensions_template.xlsx",
        }
    }
}

/// Template header row: data extension columns followed by one field group
pub fn template_headers() -> Vec<String> {
    DATA_EXTENSION_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(FieldAttribute::ALL.iter().map(|a| a.header()))
        .collect()
}

/// Write the CSV template to any writer
pub fn write_csv_template<W: Write>(out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(template_headers())
        .context("Failed to write CSV header")?;
    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Render the template in the given format
pub fn render_template(format: TemplateFormat) -> Result<Vec<u8>> {
    match format {
        TemplateFormat::Csv => {
            let mut buffer = Vec::new();
            write_csv_template(&mut buffer)?;
            Ok(buffer)
        }
        TemplateFormat::Xlsx => {
            let mut workbook = Workbook::new();
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(TEMPLATE_SHEET_NAME)?;
            for (col, header) in template_headers().iter().enumerate() {
                worksheet.write_string(0, col as u16, header)?;
            }
            workbook
                .save_to_buffer()
                .context("Failed to render Excel template")
        }
    }
}

/// Write the template to `path`
pub fn write_template(path: &Path, format: TemplateFormat) -> Result<()> {
    let bytes = render_template(format)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write template: {}", path.display()))?;
    log::info!("Template written to: {}", path.display());
    Ok(())
}
