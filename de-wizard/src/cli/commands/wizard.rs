use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::wizard::{DirectBackend, ProxyBackend, State, WizardApp, run_wizard};

#[derive(Args)]
pub struct WizardArgs {
    /// Go through a running wizard server instead of calling Marketing Cloud directly
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Data extensions per batch (overrides config)
    #[arg(long)]
    pub batch_size: Option<usize>,

    #[arg(long, env = "MC_CLIENT_ID", default_value = "")]
    pub client_id: String,

    #[arg(long, env = "MC_CLIENT_SECRET", hide_env_values = true, default_value = "")]
    pub client_secret: String,

    #[arg(long, env = "MC_AUTH_BASE_URI", default_value = "")]
    pub auth_base_uri: String,

    #[arg(long, env = "MC_REST_BASE_URI", default_value = "")]
    pub rest_base_uri: String,
}

impl WizardArgs {
    /// Initial session state, prefilled from flags or environment
    fn initial_state(&self) -> State {
        State {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_base_uri: self.auth_base_uri.clone(),
            rest_base_uri: self.rest_base_uri.clone(),
            ..State::default()
        }
    }
}

pub async fn handle_wizard_command(args: WizardArgs, config: &Config) -> Result<()> {
    let batch_size = args.batch_size.unwrap_or(config.submit.batch_size);
    if batch_size == 0 {
        anyhow::bail!("--batch-size must be at least 1");
    }
    let http = config.http_client()?;
    let state = args.initial_state();

    match args.server {
        Some(url) => {
            log::info!("Wizard running through proxy {}", url);
            let mut app = WizardApp::with_state(ProxyBackend::new(http, url, batch_size), state);
            run_wizard(&mut app).await
        }
        None => {
            let mut app = WizardApp::with_state(DirectBackend::new(http, batch_size), state);
            run_wizard(&mut app).await
        }
    }
}
