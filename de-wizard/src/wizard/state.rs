//! Wizard session state
//!
//! Owned by one session and never shared: the entered inputs, the token once
//! connected, and the last error or success notice.

use std::path::PathBuf;

use crate::api::Credentials;
use crate::api::constants::mask;

use super::types::WizardStep;

#[derive(Default)]
pub struct State {
    /// Current step in the wizard
    pub step: WizardStep,

    /// Step 1 inputs
    pub client_id: String,
    pub client_secret: String,
    pub auth_base_uri: String,
    pub rest_base_uri: String,

    /// Step 2 input
    pub file: Option<PathBuf>,

    /// Bearer token obtained in step 1
    pub access_token: Option<String>,

    /// Error message to display (overwritten on the next attempt)
    pub error: Option<String>,

    /// Success notice after a completed submission
    pub notice: Option<String>,

    /// An action is running; further actions are ignored until it finishes
    pub is_loading: bool,
}

impl State {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_base_uri: self.auth_base_uri.clone(),
        }
    }

    /// Get validation error message for the upload step
    pub fn upload_validation_error(&self) -> Option<&'static str> {
        if self.file.is_none() {
            Some("Select a CSV file to upload")
        } else if self.access_token.is_none() {
            Some("Not connected to Marketing Cloud")
        } else {
            None
        }
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("step", &self.step)
            .field("client_id", &self.client_id)
            .field("client_secret", &mask(&self.client_secret))
            .field("auth_base_uri", &self.auth_base_uri)
            .field("rest_base_uri", &self.rest_base_uri)
            .field("file", &self.file)
            .field("access_token", &self.access_token.as_deref().map(mask))
            .field("error", &self.error)
            .field("notice", &self.notice)
            .field("is_loading", &self.is_loading)
            .finish()
    }
}
