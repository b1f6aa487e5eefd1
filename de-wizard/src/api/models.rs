//! Request and response bodies exchanged with Marketing Cloud and the proxy

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spreadsheet::DataExtension;

use super::constants::{CLIENT_CREDENTIALS_GRANT, mask};

/// Installed-package credentials plus the tenant's auth base URI
///
/// Also the body of `POST /api/connect`. Absent fields deserialize as empty
/// strings; the token endpoint decides whether they are acceptable.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub auth_base_uri: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &mask(&self.client_secret))
            .field("auth_base_uri", &self.auth_base_uri)
            .finish()
    }
}

/// Body of the client-credentials grant sent to `{authBaseUri}/v2/token`
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub grant_type: &'static str,
}

impl<'a> TokenRequest<'a> {
    pub fn client_credentials(credentials: &'a Credentials) -> Self {
        Self {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            grant_type: CLIENT_CREDENTIALS_GRANT,
        }
    }
}

/// Token endpoint response, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse(pub Value);

impl TokenResponse {
    /// Non-empty `access_token`, if present
    pub fn access_token(&self) -> Option<&str> {
        self.0
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Tenant REST base URI advertised alongside the token
    pub fn rest_instance_url(&self) -> Option<&str> {
        self.0
            .get("rest_instance_url")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.0.get("expires_in").and_then(Value::as_u64)
    }
}

/// Body of `POST /api/dataextensions`
///
/// The proxy sink sends typed records; the server accepts each entry as raw
/// JSON and forwards it untouched.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataExtensionsRequest<T = Value> {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub rest_base_uri: String,
    #[serde(default = "Vec::new")]
    pub data_extensions: Vec<T>,
}

impl<T> std::fmt::Debug for CreateDataExtensionsRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateDataExtensionsRequest")
            .field("access_token", &mask(&self.access_token))
            .field("rest_base_uri", &self.rest_base_uri)
            .field("data_extensions", &self.data_extensions.len())
            .finish()
    }
}

/// What the proxy sink posts for one batch
pub type DataExtensionBatch = CreateDataExtensionsRequest<DataExtension>;
