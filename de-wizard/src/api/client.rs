//! Marketing Cloud REST client for creating data extensions

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::spreadsheet::DataExtension;

use super::constants::{CUSTOM_OBJECTS_PATH, endpoint};
use super::read_json;

/// REST client bound to one tenant and one access token
#[derive(Clone)]
pub struct MarketingCloudClient {
    http: Client,
    rest_base_uri: String,
    access_token: String,
}

impl MarketingCloudClient {
    pub fn new(http: Client, rest_base_uri: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            rest_base_uri: rest_base_uri.into(),
            access_token: access_token.into(),
        }
    }

    pub fn rest_base_uri(&self) -> &str {
        &self.rest_base_uri
    }

    /// `POST {restBaseUri}/data/v1/customobjects` with the data extension as body
    pub async fn create_data_extension(&self, data_extension: &DataExtension) -> Result<Value, ApiError> {
        let label = format!("'{}' ({})", data_extension.name, data_extension.key);
        log::debug!("Data extension {} has {} fields", label, data_extension.fields.len());
        self.post_custom_object(&label, data_extension).await
    }

    /// Create each data extension in order, stopping at the first failure
    pub async fn create_data_extensions(&self, data_extensions: &[DataExtension]) -> Result<(), ApiError> {
        for data_extension in data_extensions {
            self.create_data_extension(data_extension).await?;
        }
        Ok(())
    }

    /// Post an entry exactly as received, with no local validation
    pub async fn create_raw_data_extension(&self, entry: &Value) -> Result<Value, ApiError> {
        let label = match (entry.get("name"), entry.get("key")) {
            (Some(name), Some(key)) => format!("{} ({})", name, key),
            _ => "<unnamed>".to_string(),
        };
        self.post_custom_object(&label, entry).await
    }

    /// Raw counterpart of [`Self::create_data_extensions`]
    pub async fn create_raw_data_extensions(&self, entries: &[Value]) -> Result<(), ApiError> {
        for entry in entries {
            self.create_raw_data_extension(entry).await?;
        }
        Ok(())
    }

    async fn post_custom_object<B: Serialize + ?Sized>(&self, label: &str, body: &B) -> Result<Value, ApiError> {
        let url = endpoint(&self.rest_base_uri, CUSTOM_OBJECTS_PATH);
        log::debug!("Creating data extension {} at {}", label, url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        match read_json(response).await {
            Ok(body) => {
                log::info!("Created data extension {}", label);
                log::debug!("Creation response: {}", body);
                Ok(body)
            }
            Err(err) => {
                log::error!("Failed to create data extension {}: {}", label, err);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for MarketingCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketingCloudClient")
            .field("rest_base_uri", &self.rest_base_uri)
            .field("access_token", &"****")
            .finish()
    }
}
