//! Spreadsheet decoding for data extension uploads
//!
//! One sheet, header row first. Each row carries a data extension's
//! `(name, key)` plus one or more 12-column field groups; adjacent rows with
//! the same pair are folded into a single data extension.

pub mod cell;
pub mod decoder;
pub mod grouping;
pub mod reader;
pub mod schema;
pub mod template;
pub mod types;

pub use decoder::{decode_data_extensions, decode_file, decode_rows};
pub use schema::{FIELD_GROUP_WIDTH, FieldAttribute, HeaderSchema};
pub use template::{TemplateFormat, render_template, template_headers, write_template};
pub use types::{DataExtension, Field};
