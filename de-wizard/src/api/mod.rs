//! Marketing Cloud API access
//!
//! Two remote calls are all the wizard needs: the client-credentials token
//! exchange and the custom objects create endpoint. Both are plain
//! request/response with no retry and no token refresh.

pub mod auth;
pub mod client;
pub mod constants;
pub mod models;

pub use auth::AuthManager;
pub use client::MarketingCloudClient;
pub use constants::{CREATED_MESSAGE, DEFAULT_BATCH_SIZE};
pub use models::{
    CreateDataExtensionsRequest, Credentials, DataExtensionBatch, TokenRequest, TokenResponse,
};

use reqwest::Response;
use serde_json::Value;

use crate::error::ApiError;

/// Turn a response into its JSON body, or an [`ApiError::Status`] carrying the
/// remote body for non-success statuses
///
/// Empty success bodies become `Value::Null`; non-JSON success bodies are kept
/// as a JSON string.
pub(crate) async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}
