use anyhow::{Context, Result};
use clap::Args;

use crate::api::{AuthManager, Credentials};
use crate::config::Config;

#[derive(Args)]
pub struct ConnectArgs {
    #[arg(long, env = "MC_CLIENT_ID")]
    pub client_id: String,

    #[arg(long, env = "MC_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Tenant authentication base URI
    #[arg(long, env = "MC_AUTH_BASE_URI")]
    pub auth_base_uri: String,
}

/// Print the token response so it can be fed to `upload`
pub async fn handle_connect_command(args: ConnectArgs, config: &Config) -> Result<()> {
    let credentials = Credentials {
        client_id: args.client_id,
        client_secret: args.client_secret,
        auth_base_uri: args.auth_base_uri,
    };

    let auth = AuthManager::new(config.http_client()?);
    let token = auth
        .connect(&credentials)
        .await
        .context("Error connecting to Marketing Cloud")?;

    println!("{}", serde_json::to_string_pretty(&token.0)?);
    Ok(())
}
