//! Load the first sheet of an uploaded file as a grid of cells
//!
//! Binary workbooks (xlsx, xlsm, xlsb, xls, ods) are recognised by their
//! container magic and opened with calamine. Anything else is read as CSV,
//! each cell becoming `Data::String` so both paths share the coercion rules.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use csv::ReaderBuilder;

use crate::error::ParseError;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Container format of an uploaded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(CFB_MAGIC) {
            SourceFormat::Workbook
        } else {
            SourceFormat::Csv
        }
    }
}

/// Rows of the first sheet, header row included
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<Data>>, ParseError> {
    match SourceFormat::detect(bytes) {
        SourceFormat::Workbook => read_workbook(bytes),
        SourceFormat::Csv => read_csv(bytes),
    }
}

fn read_workbook(bytes: &[u8]) -> Result<Vec<Vec<Data>>, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParseError::Workbook(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ParseError::NoSheets)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ParseError::Workbook(format!("failed to read sheet '{}': {}", sheet_name, e)))?;

    log::debug!(
        "Read sheet '{}' ({} rows x {} columns)",
        sheet_name,
        range.height(),
        range.width()
    );

    Ok(range.rows().map(|r| r.to_vec()).collect())
}

fn read_csv(bytes: &[u8]) -> Result<Vec<Vec<Data>>, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Csv(e.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Data::Empty
                    } else {
                        Data::String(field.to_string())
                    }
                })
                .collect(),
        );
    }

    log::debug!("Read {} CSV rows", rows.len());
    Ok(rows)
}
