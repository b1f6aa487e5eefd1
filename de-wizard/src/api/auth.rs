//! Client-credentials token exchange

use reqwest::Client;
use serde_json::Value;

use crate::error::{ApiError, ConnectionError};

use super::constants::{TOKEN_PATH, endpoint};
use super::models::{Credentials, TokenRequest, TokenResponse};
use super::read_json;

/// Exchanges installed-package credentials for a bearer token
#[derive(Debug, Clone)]
pub struct AuthManager {
    http: Client,
}

impl AuthManager {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Forward the grant and return the remote body untouched
    pub async fn request_token(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let url = endpoint(&credentials.auth_base_uri, TOKEN_PATH);
        log::info!(
            "Requesting token for client {} from {}",
            credentials.client_id,
            url
        );

        let response = self
            .http
            .post(&url)
            .json(&TokenRequest::client_credentials(credentials))
            .send()
            .await?;

        read_json(response).await
    }

    /// Exchange credentials for a token; the response must carry `access_token`
    pub async fn connect(&self, credentials: &Credentials) -> Result<TokenResponse, ConnectionError> {
        let token = TokenResponse(self.request_token(credentials).await?);
        if token.access_token().is_none() {
            log::error!("Token response from {} had no access_token", credentials.auth_base_uri);
            return Err(ConnectionError::MissingToken);
        }

        log::info!(
            "Connected as client {} (expires in {}s)",
            credentials.client_id,
            token.expires_in().map_or_else(|| "?".to_string(), |s| s.to_string())
        );
        Ok(token)
    }
}
