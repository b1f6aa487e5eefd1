//! API handlers
//!
//! Both are passthroughs: the body is forwarded as received and any remote
//! failure becomes a 500 carrying the remote error body.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use crate::api::{AuthManager, CREATED_MESSAGE, CreateDataExtensionsRequest, Credentials, MarketingCloudClient};

use super::AppState;

/// `POST /api/connect`: forward the client-credentials grant, return the
/// remote JSON verbatim
pub async fn connect(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, (StatusCode, String)> {
    log::info!("Connecting to Marketing Cloud with: {:?}", credentials);

    match AuthManager::new(state.http.clone()).request_token(&credentials).await {
        Ok(body) => {
            log::info!("Connected client {}", credentials.client_id);
            Ok(Json(body))
        }
        Err(e) => {
            log::error!("Error connecting to Marketing Cloud: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.remote_message()))
        }
    }
}

/// `POST /api/dataextensions`: post every entry of the body as its own
/// request, in order, stopping at the first failure
pub async fn create_data_extensions(
    State(state): State<AppState>,
    Json(request): Json<CreateDataExtensionsRequest>,
) -> Result<&'static str, (StatusCode, String)> {
    log::info!("Creating Data Extensions with: {:?}", request);

    let client = MarketingCloudClient::new(
        state.http.clone(),
        request.rest_base_uri,
        request.access_token,
    );

    match client.create_raw_data_extensions(&request.data_extensions).await {
        Ok(()) => {
            log::info!("{} ({})", CREATED_MESSAGE, request.data_extensions.len());
            Ok(CREATED_MESSAGE)
        }
        Err(e) => {
            log::error!("Error creating Data Extensions: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.remote_message()))
        }
    }
}
