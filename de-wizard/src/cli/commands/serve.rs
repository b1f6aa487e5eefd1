use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::Config;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config and $PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory holding the prebuilt front-end bundle
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,
}

pub async fn handle_serve_command(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.static_dir {
        config.server.static_dir = dir;
    }

    crate::server::serve(config).await
}
