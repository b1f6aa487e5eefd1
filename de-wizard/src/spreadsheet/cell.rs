//! Cell value coercion
//!
//! Workbook cells arrive typed (calamine `Data`), CSV cells arrive as text
//! wrapped in `Data::String`. Both go through the same rules here.

use calamine::{Data, ExcelDateTime};
use chrono::NaiveTime;

/// Whole-number float within `i64` range
fn whole_number(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

/// ISO rendering of a date cell: `YYYY-MM-DD` at midnight, else with the time
fn date_text(dt: &ExcelDateTime) -> String {
    match dt.as_datetime() {
        Some(value) if value.time() == NaiveTime::MIN => value.date().to_string(),
        Some(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}

/// Render a cell as trimmed text, `None` when empty
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(whole_number(*f).map_or_else(|| f.to_string(), |i| i.to_string())),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(date_text(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Cell at `col`, treating short rows as empty past their end
pub fn cell_at(row: &[Data], col: usize) -> Option<String> {
    row.get(col).and_then(cell_text)
}

/// Integer attribute; anything that is not a whole number yields `None`
pub fn cell_int(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) => whole_number(*f),
        Data::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        _ => None,
    }
}

/// Boolean attribute: true only for a boolean `true` or the text "true"
pub fn cell_flag(cell: &Data) -> bool {
    match cell {
        Data::Bool(b) => *b,
        Data::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Header cells are compared by their trimmed text
pub fn header_text(cell: &Data) -> String {
    cell_text(cell).unwrap_or_default()
}

/// Whether every cell in the row is empty
pub fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|c| cell_text(c).is_none())
}
