//! Create Marketing Cloud data extensions from a CSV or Excel sheet
//!
//! The library holds everything the `de-wizard` binary runs: the spreadsheet
//! decoder, the batch submitter, the Marketing Cloud API calls, the proxy
//! server and the interactive wizard.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod spreadsheet;
pub mod submit;
pub mod wizard;

pub use error::{ApiError, ConnectionError, ParseError, SubmissionError, WizardError};
