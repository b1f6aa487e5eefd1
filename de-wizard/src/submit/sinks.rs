//! Batch sinks: straight to Marketing Cloud, or through the wizard server

use async_trait::async_trait;
use reqwest::Client;

use crate::api::{DataExtensionBatch, MarketingCloudClient, constants::endpoint};
use crate::error::ApiError;
use crate::spreadsheet::DataExtension;

use super::batch::BatchSink;

/// Path of the proxy endpoint that creates a batch
pub const PROXY_DATA_EXTENSIONS_PATH: &str = "/api/dataextensions";

/// Creates each data extension of a batch directly against the REST API
#[derive(Debug, Clone)]
pub struct DirectSink {
    client: MarketingCloudClient,
}

impl DirectSink {
    pub fn new(client: MarketingCloudClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BatchSink for DirectSink {
    async fn submit_batch(&self, batch: &[DataExtension]) -> Result<(), ApiError> {
        self.client.create_data_extensions(batch).await
    }
}

/// Posts each batch once to a running wizard server
#[derive(Clone)]
pub struct ProxySink {
    http: Client,
    server_url: String,
    access_token: String,
    rest_base_uri: String,
}

impl ProxySink {
    pub fn new(
        http: Client,
        server_url: impl Into<String>,
        access_token: impl Into<String>,
        rest_base_uri: impl Into<String>,
    ) -> Self {
        Self {
            http,
            server_url: server_url.into(),
            access_token: access_token.into(),
            rest_base_uri: rest_base_uri.into(),
        }
    }
}

#[async_trait]
impl BatchSink for ProxySink {
    async fn submit_batch(&self, batch: &[DataExtension]) -> Result<(), ApiError> {
        let url = endpoint(&self.server_url, PROXY_DATA_EXTENSIONS_PATH);
        let body = DataExtensionBatch {
            access_token: self.access_token.clone(),
            rest_base_uri: self.rest_base_uri.clone(),
            data_extensions: batch.to_vec(),
        };
        log::debug!("Posting {:?} to {}", body, url);

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        log::debug!("Proxy answered: {}", text);
        Ok(())
    }
}
