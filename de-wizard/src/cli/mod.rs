//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use commands::{
    connect::ConnectArgs, decode::DecodeArgs, serve::ServeArgs, template::TemplateArgs,
    upload::UploadArgs, wizard::WizardArgs,
};

#[derive(Parser)]
#[command(name = "de-wizard")]
#[command(about = "Create Marketing Cloud data extensions from a spreadsheet")]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (defaults to $DE_WIZARD_CONFIG or the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the proxy server and serve the front-end bundle
    Serve(ServeArgs),
    /// Interactive two-step wizard
    Wizard(WizardArgs),
    /// Exchange credentials for a token and print the response
    Connect(ConnectArgs),
    /// Decode a spreadsheet and print the data extensions (no network)
    Decode(DecodeArgs),
    /// Decode a spreadsheet and create its data extensions
    Upload(UploadArgs),
    /// Write a blank upload template
    Template(TemplateArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if self.no_color {
            colored::control::set_override(false);
        }

        let config_path = self.config;
        let load_config = || Config::load(config_path.as_deref());

        // Template and decode never read the config
        match self.command {
            Commands::Template(args) => commands::template::handle_template_command(args),
            Commands::Decode(args) => commands::decode::handle_decode_command(args).await,
            Commands::Serve(args) => commands::serve::handle_serve_command(args, load_config()?).await,
            Commands::Wizard(args) => commands::wizard::handle_wizard_command(args, &load_config()?).await,
            Commands::Connect(args) => commands::connect::handle_connect_command(args, &load_config()?).await,
            Commands::Upload(args) => commands::upload::handle_upload_command(args, &load_config()?).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "de-wizard",
            "--no-color",
            "upload",
            "des.csv",
            "--access-token",
            "tok",
            "--rest-base-uri",
            "https://rest.example.com",
            "--batch-size",
            "50",
        ])
        .unwrap();

        assert!(cli.no_color);
        match cli.command {
            Commands::Upload(args) => {
                assert_eq!(args.file, PathBuf::from("des.csv"));
                assert_eq!(args.batch_size, Some(50));
                assert_eq!(args.server, None);
            }
            _ => panic!("expected upload"),
        }
    }

    #[test]
    fn test_parse_template_format() {
        let cli = Cli::try_parse_from(["de-wizard", "template", "--format", "xlsx"]).unwrap();
        match cli.command {
            Commands::Template(args) => {
                assert_eq!(args.format, crate::spreadsheet::TemplateFormat::Xlsx);
                assert_eq!(args.out, None);
            }
            _ => panic!("expected template"),
        }
    }

    #[tokio::test]
    async fn test_template_ignores_unreadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("template.csv");
        let cli = Cli::try_parse_from([
            "de-wizard",
            "--config",
            "/nonexistent/config.toml",
            "template",
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();

        cli.run().await.unwrap();
        assert!(std::fs::read_to_string(&out).unwrap().starts_with("name,key,"));
    }

    #[tokio::test]
    async fn test_upload_reports_unreadable_config() {
        let cli = Cli::try_parse_from([
            "de-wizard",
            "--config",
            "/nonexistent/config.toml",
            "upload",
            "des.csv",
            "--access-token",
            "tok",
            "--rest-base-uri",
            "https://rest.example.com",
        ])
        .unwrap();

        let err = cli.run().await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
