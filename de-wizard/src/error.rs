//! Error taxonomy for the wizard
//!
//! Three families reach the user: connection failures (token exchange),
//! parse failures (the uploaded spreadsheet) and submission failures (a batch
//! rejected by the custom objects endpoint). Each collapses to one display
//! string through [`WizardError::user_message`].

use thiserror::Error;

/// Failure of a single remote call
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, refused connection, timeout)
    #[error("request failed: {0}")]
    Network(String),
    /// The remote answered with a non-success status
    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The remote answered 2xx but the body was not what we expected
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The remote error body when there is one, otherwise a generic message
    pub fn remote_message(&self) -> String {
        match self {
            ApiError::Status { status, body } if body.trim().is_empty() => {
                format!("Request failed with status code {}", status)
            }
            ApiError::Status { body, .. } => body.clone(),
            ApiError::Network(message) | ApiError::Decode(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Client-credentials exchange failed
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("token response did not contain an access_token")]
    MissingToken,
}

/// Problem with one attribute header inside a field group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeProblem {
    Missing,
    Duplicate,
    Unknown,
}

impl std::fmt::Display for AttributeProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeProblem::Missing => write!(f, "missing"),
            AttributeProblem::Duplicate => write!(f, "duplicated"),
            AttributeProblem::Unknown => write!(f, "not a field attribute"),
        }
    }
}

/// The uploaded file could not be decoded into data extensions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("failed to open workbook: {0}")]
    Workbook(String),
    #[error("failed to read CSV: {0}")]
    Csv(String),
    #[error("workbook has no sheets")]
    NoSheets,
    #[error("sheet has no header row")]
    EmptySheet,
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("no column header starts with 'fields__'")]
    MissingFieldsBlock,
    #[error("field group starting at column {start} has {width} columns, expected 12")]
    PartialFieldGroup { start: usize, width: usize },
    #[error("field group {group}: header '{attribute}' is {problem}")]
    FieldGroupAttribute {
        group: usize,
        attribute: String,
        problem: AttributeProblem,
    },
    #[error("row {row}: missing value for '{column}'")]
    MissingValue { row: usize, column: String },
    #[error("row {row}: data extension '{name}' ({key}) already appeared earlier in the sheet")]
    DuplicateDataExtension { row: usize, name: String, key: String },
}

/// One batch was rejected; later batches were never sent
#[derive(Debug, Clone, Error)]
#[error("batch {batch} of {batches} failed: {source}")]
pub struct SubmissionError {
    /// 1-based index of the failing batch
    pub batch: usize,
    pub batches: usize,
    pub source: ApiError,
}

/// Anything that can end a wizard action
#[derive(Debug, Clone, Error)]
pub enum WizardError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl WizardError {
    /// The single string shown to the user
    pub fn user_message(&self) -> String {
        match self {
            WizardError::Connection(ConnectionError::Api(api)) => api.remote_message(),
            WizardError::Connection(err) => err.to_string(),
            WizardError::Parse(err) => err.to_string(),
            WizardError::Submission(err) => err.source.remote_message(),
        }
    }
}
