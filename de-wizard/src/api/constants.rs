//! Marketing Cloud endpoint paths and wire constants

/// Token endpoint, relative to the tenant's auth base URI
pub const TOKEN_PATH: &str = "/v2/token";

/// Custom objects (data extensions) endpoint, relative to the REST base URI
pub const CUSTOM_OBJECTS_PATH: &str = "/data/v1/customobjects";

pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Success message returned by the proxy and shown by the wizard
pub const CREATED_MESSAGE: &str = "Data Extensions created successfully";

/// Default number of data extensions per submitted batch
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Join a base URI and an absolute path without doubling slashes
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim().trim_end_matches('/'), path)
}

/// Mask a secret for logging
pub fn mask(secret: &str) -> &'static str {
    if secret.is_empty() { "<empty>" } else { "****" }
}
