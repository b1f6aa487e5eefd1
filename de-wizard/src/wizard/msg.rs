//! Messages and commands for the wizard

use std::path::PathBuf;

use crate::api::Credentials;
use crate::submit::SubmissionReport;

/// Result of a successful connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOutcome {
    pub access_token: String,
    /// REST base URI advertised by the token endpoint, if any
    pub rest_instance_url: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Msg {
    // Step 1 inputs
    ClientIdChanged(String),
    ClientSecretChanged(String),
    AuthBaseUriChanged(String),
    RestBaseUriChanged(String),

    // Step 2 input
    FileSelected(PathBuf),

    // Controls
    Next,
    Back,

    // Async results (error already reduced to its user-visible message)
    Connected(Result<ConnectOutcome, String>),
    Submitted(Result<SubmissionReport, String>),
}

/// Side effect requested by `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Connect(Credentials),
    Submit {
        file: PathBuf,
        access_token: String,
        rest_base_uri: String,
    },
}
