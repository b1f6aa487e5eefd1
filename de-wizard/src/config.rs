//! Application configuration
//!
//! Search order:
//! 1. `$DE_WIZARD_CONFIG`
//! 2. `<config dir>/de-wizard/config.toml`
//! 3. Embedded defaults
//!
//! Environment variables (`PORT`, `DE_WIZARD_STATIC_DIR`, `DE_WIZARD_BATCH_SIZE`)
//! override whatever was loaded; CLI flags override both.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BATCH_SIZE;

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 5000
static_dir = "client/build"
body_limit_bytes = 10485760

[submit]
batch_size = 200

[http]
timeout_secs = 30
"#;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub submit: SubmitConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Prebuilt front-end bundle served for non-API paths
    pub static_dir: PathBuf,
    /// Maximum accepted request body (batches of 200 data extensions get large)
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    pub batch_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            static_dir: PathBuf::from("client/build"),
            body_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Config {
    /// Load from an explicit path, the standard locations, or the defaults,
    /// then apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::locate(explicit) {
            Some(path) => {
                log::info!("Loading config from: {}", path.display());
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                Self::from_toml_str(&contents)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?
            }
            None => {
                log::debug!("Using default embedded configuration");
                Self::from_toml_str(DEFAULT_CONFIG)?
            }
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config TOML")
    }

    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var("DE_WIZARD_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("de-wizard").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", port))?;
        }
        if let Some(dir) = lookup("DE_WIZARD_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }
        if let Some(size) = lookup("DE_WIZARD_BATCH_SIZE") {
            self.submit.batch_size = size
                .trim()
                .parse()
                .with_context(|| format!("DE_WIZARD_BATCH_SIZE is not a number: {}", size))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.submit.batch_size == 0 {
            bail!("submit.batch_size must be at least 1");
        }
        if self.http.timeout_secs == 0 {
            bail!("http.timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Shared HTTP client honouring the configured timeout
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .build()
            .context("Failed to create HTTP client")
    }
}
