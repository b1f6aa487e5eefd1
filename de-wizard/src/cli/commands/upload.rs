use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::api::CREATED_MESSAGE;
use crate::config::Config;
use crate::wizard::{DirectBackend, ProxyBackend, WizardBackend};

#[derive(Args)]
pub struct UploadArgs {
    /// CSV or Excel file to decode and submit
    pub file: PathBuf,

    #[arg(long, env = "MC_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Tenant REST base URI
    #[arg(long, env = "MC_REST_BASE_URI")]
    pub rest_base_uri: String,

    /// Data extensions per batch (overrides config)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Submit through a running wizard server instead of directly
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,
}

pub async fn handle_upload_command(args: UploadArgs, config: &Config) -> Result<()> {
    let batch_size = args.batch_size.unwrap_or(config.submit.batch_size);
    if batch_size == 0 {
        anyhow::bail!("--batch-size must be at least 1");
    }
    if !args.file.exists() {
        anyhow::bail!("File does not exist: {}", args.file.display());
    }

    let http = config.http_client()?;
    let backend: Box<dyn WizardBackend> = match args.server {
        Some(url) => {
            println!("Submitting through {}", url.cyan());
            Box::new(ProxyBackend::new(http, url, batch_size))
        }
        None => Box::new(DirectBackend::new(http, batch_size)),
    };

    let report = backend
        .submit(&args.file, &args.access_token, &args.rest_base_uri)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Error creating Data Extensions")?;

    println!(
        "{} {} ({} data extensions in {} batches)",
        "✓".green(),
        CREATED_MESSAGE.green(),
        report.records,
        report.batches
    );
    Ok(())
}
