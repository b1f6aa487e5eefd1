//! Where wizard actions run
//!
//! The direct backend talks to Marketing Cloud itself. The proxy backend goes
//! through a running `de-wizard serve` instance, the way the browser
//! front-end does.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;

use crate::api::constants::endpoint;
use crate::api::{AuthManager, Credentials, MarketingCloudClient, TokenResponse};
use crate::error::{ApiError, ConnectionError, WizardError};
use crate::spreadsheet::decode_file;
use crate::submit::{DirectSink, ProxySink, SubmissionReport, submit_in_batches};

use super::msg::ConnectOutcome;

/// Path of the proxy endpoint that exchanges credentials
pub const PROXY_CONNECT_PATH: &str = "/api/connect";

#[async_trait]
pub trait WizardBackend: Send + Sync {
    async fn connect(&self, credentials: &Credentials) -> Result<ConnectOutcome, WizardError>;

    /// Decode `file` and create every data extension it describes
    async fn submit(
        &self,
        file: &Path,
        access_token: &str,
        rest_base_uri: &str,
    ) -> Result<SubmissionReport, WizardError>;
}

fn outcome(token: &TokenResponse) -> Result<ConnectOutcome, ConnectionError> {
    let access_token = token.access_token().ok_or(ConnectionError::MissingToken)?;
    Ok(ConnectOutcome {
        access_token: access_token.to_string(),
        rest_instance_url: token.rest_instance_url().map(str::to_string),
    })
}

/// Calls Marketing Cloud directly
#[derive(Debug, Clone)]
pub struct DirectBackend {
    http: Client,
    batch_size: usize,
}

impl DirectBackend {
    pub fn new(http: Client, batch_size: usize) -> Self {
        Self { http, batch_size }
    }
}

#[async_trait]
impl WizardBackend for DirectBackend {
    async fn connect(&self, credentials: &Credentials) -> Result<ConnectOutcome, WizardError> {
        let token = AuthManager::new(self.http.clone()).connect(credentials).await?;
        Ok(outcome(&token)?)
    }

    async fn submit(
        &self,
        file: &Path,
        access_token: &str,
        rest_base_uri: &str,
    ) -> Result<SubmissionReport, WizardError> {
        let records = decode_file(file).await?;
        let client = MarketingCloudClient::new(self.http.clone(), rest_base_uri, access_token);
        let sink = DirectSink::new(client);
        Ok(submit_in_batches(&sink, &records, self.batch_size).await?)
    }
}

/// Goes through a running wizard server
#[derive(Debug, Clone)]
pub struct ProxyBackend {
    http: Client,
    server_url: String,
    batch_size: usize,
}

impl ProxyBackend {
    pub fn new(http: Client, server_url: impl Into<String>, batch_size: usize) -> Self {
        Self {
            http,
            server_url: server_url.into(),
            batch_size,
        }
    }
}

#[async_trait]
impl WizardBackend for ProxyBackend {
    async fn connect(&self, credentials: &Credentials) -> Result<ConnectOutcome, WizardError> {
        let url = endpoint(&self.server_url, PROXY_CONNECT_PATH);
        log::info!("Connecting through proxy {}", url);

        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| ConnectionError::from(ApiError::from(e)))?;
        let body = crate::api::read_json(response)
            .await
            .map_err(ConnectionError::from)?;

        Ok(outcome(&TokenResponse(body))?)
    }

    async fn submit(
        &self,
        file: &Path,
        access_token: &str,
        rest_base_uri: &str,
    ) -> Result<SubmissionReport, WizardError> {
        let records = decode_file(file).await?;
        let sink = ProxySink::new(self.http.clone(), &self.server_url, access_token, rest_base_uri);
        Ok(submit_in_batches(&sink, &records, self.batch_size).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::template_headers;
    use httpmock::prelude::*;
    use serde_json::json;

    fn credentials(base: &str) -> Credentials {
        Credentials {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            auth_base_uri: base.to_string(),
        }
    }

    /// One data extension with one field, as a CSV file on disk
    fn write_csv(dir: &Path, data_extensions: usize) -> std::path::PathBuf {
        let headers = template_headers();
        let mut out = headers.join(",");
        out.push('\n');
        for i in 0..data_extensions {
            let mut row = vec![format!("DE{}", i), format!("KEY{}", i), String::new(), String::new(), String::new()];
            // name, type, length, ordinal, then eight flags
            row.extend(["Email", "EmailAddress", "254", "1"].map(String::from));
            row.extend(std::iter::repeat_n("false".to_string(), 8));
            assert_eq!(row.len(), headers.len());
            out.push_str(&row.join(","));
            out.push('\n');
        }
        let path = dir.join("des.csv");
        std::fs::write(&path, out).unwrap();
        path
    }

    #[tokio::test]
    async fn test_direct_connect_reads_instance_url() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2/token");
                then.status(200).json_body(json!({
                    "access_token": "tok",
                    "rest_instance_url": "https://rest.example.com/"
                }));
            })
            .await;

        let backend = DirectBackend::new(Client::new(), 200);
        let outcome = backend.connect(&credentials(&server.base_url())).await.unwrap();

        assert_eq!(outcome.access_token, "tok");
        assert_eq!(outcome.rest_instance_url.as_deref(), Some("https://rest.example.com/"));
    }

    #[tokio::test]
    async fn test_direct_submit_decode_failure_sends_nothing() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/data/v1/customobjects");
                then.status(201);
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "name,key\nA,B\n").unwrap();

        let backend = DirectBackend::new(Client::new(), 200);
        let err = backend.submit(&path, "tok", &server.base_url()).await.unwrap_err();

        assert!(matches!(err, WizardError::Parse(_)));
        create.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_proxy_connect_and_submit() {
        let server = MockServer::start_async().await;
        let connect = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/connect")
                    .json_body_partial(r#"{"clientId":"client","authBaseUri":"https://auth.example.com"}"#);
                then.status(200).json_body(json!({ "access_token": "tok" }));
            })
            .await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/dataextensions")
                    .json_body_partial(r#"{"accessToken":"tok"}"#);
                then.status(200).body("Data Extensions created successfully");
            })
            .await;

        let backend = ProxyBackend::new(Client::new(), server.base_url(), 2);
        let outcome = backend
            .connect(&credentials("https://auth.example.com"))
            .await
            .unwrap();
        connect.assert_async().await;
        assert_eq!(outcome.rest_instance_url, None);

        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), 5);
        let report = backend
            .submit(&path, &outcome.access_token, "https://rest.example.com")
            .await
            .unwrap();

        assert_eq!(report, SubmissionReport { batches: 3, records: 5 });
        create.assert_hits_async(3).await;
    }

    #[tokio::test]
    async fn test_proxy_connect_failure_carries_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/connect");
                then.status(500).body("invalid_client");
            })
            .await;

        let backend = ProxyBackend::new(Client::new(), server.base_url(), 200);
        let err = backend
            .connect(&credentials("https://auth.example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "invalid_client");
    }
}
