//! Wizard update logic
//!
//! `update` is pure: it mutates the state and returns the side effect to
//! run. [`WizardApp`] runs that effect through a backend and feeds the result
//! back in, so every action completes before the next one is accepted.

use crate::api::CREATED_MESSAGE;

use super::backend::WizardBackend;
use super::msg::{Command, Msg};
use super::state::State;
use super::types::WizardStep;

pub const CONNECT_ERROR_PREFIX: &str = "Error connecting to Marketing Cloud: ";
pub const SUBMIT_ERROR_PREFIX: &str = "Error creating Data Extensions: ";

pub fn update(state: &mut State, msg: Msg) -> Command {
    match msg {
        Msg::ClientIdChanged(value) => state.client_id = value,
        Msg::ClientSecretChanged(value) => state.client_secret = value,
        Msg::AuthBaseUriChanged(value) => state.auth_base_uri = value,
        Msg::RestBaseUriChanged(value) => state.rest_base_uri = value,
        Msg::FileSelected(path) => {
            state.file = Some(path);
            state.notice = None;
        }

        Msg::Next => return handle_next(state),

        Msg::Back => {
            if !state.is_loading && state.step == WizardStep::Uploading {
                state.step = WizardStep::Configuring;
                state.access_token = None;
                state.error = None;
                state.notice = None;
            }
        }

        Msg::Connected(result) => {
            state.is_loading = false;
            match result {
                Ok(outcome) => {
                    if state.rest_base_uri.trim().is_empty() {
                        if let Some(url) = outcome.rest_instance_url {
                            log::info!("Using REST base URI from token response: {}", url);
                            state.rest_base_uri = url;
                        }
                    }
                    state.access_token = Some(outcome.access_token);
                    state.error = None;
                    state.step = WizardStep::Uploading;
                }
                Err(message) => {
                    state.error = Some(format!("{}{}", CONNECT_ERROR_PREFIX, message));
                }
            }
        }

        Msg::Submitted(result) => {
            state.is_loading = false;
            match result {
                Ok(report) => {
                    state.notice = Some(format!(
                        "{} ({} data extensions in {} batches)",
                        CREATED_MESSAGE, report.records, report.batches
                    ));
                }
                Err(message) => {
                    state.error = Some(format!("{}{}", SUBMIT_ERROR_PREFIX, message));
                }
            }
        }
    }

    Command::None
}

fn handle_next(state: &mut State) -> Command {
    if state.is_loading {
        return Command::None;
    }
    state.error = None;

    match state.step {
        WizardStep::Configuring => {
            state.is_loading = true;
            Command::Connect(state.credentials())
        }
        WizardStep::Uploading => {
            if let Some(problem) = state.upload_validation_error() {
                state.error = Some(format!("{}{}", SUBMIT_ERROR_PREFIX, problem));
                return Command::None;
            }
            let (Some(file), Some(access_token)) = (state.file.clone(), state.access_token.clone()) else {
                return Command::None;
            };
            state.notice = None;
            state.is_loading = true;
            Command::Submit {
                file,
                access_token,
                rest_base_uri: state.rest_base_uri.clone(),
            }
        }
    }
}

/// A wizard session bound to a backend
pub struct WizardApp<B> {
    pub state: State,
    backend: B,
}

impl<B: WizardBackend> WizardApp<B> {
    pub fn new(backend: B) -> Self {
        Self {
            state: State::default(),
            backend,
        }
    }

    pub fn with_state(backend: B, state: State) -> Self {
        Self { state, backend }
    }

    /// Apply a message and run any resulting command to completion
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut next = Some(msg);
        while let Some(msg) = next.take() {
            next = match update(&mut self.state, msg) {
                Command::None => None,
                Command::Connect(credentials) => {
                    let result = self.backend.connect(&credentials).await;
                    Some(Msg::Connected(result.map_err(|e| e.user_message())))
                }
                Command::Submit {
                    file,
                    access_token,
                    rest_base_uri,
                } => {
                    let result = self.backend.submit(&file, &access_token, &rest_base_uri).await;
                    Some(Msg::Submitted(result.map_err(|e| e.user_message())))
                }
            };
        }
    }
}
