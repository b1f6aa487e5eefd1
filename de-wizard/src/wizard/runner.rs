//! Interactive terminal front-end for the wizard

use std::path::PathBuf;

use anyhow::Result;
use colored::*;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};

use super::app::WizardApp;
use super::backend::WizardBackend;
use super::msg::Msg;
use super::types::{STEPS, WizardStep};

const PROGRESS_WIDTH: usize = 30;

/// Drive the wizard until the user quits
pub async fn run_wizard<B: WizardBackend>(app: &mut WizardApp<B>) -> Result<()> {
    let theme = ColorfulTheme::default();

    println!();
    println!("{}", "Data Extension Setup Wizard".cyan().bold());

    loop {
        print_step(app.state.step);

        match app.state.step {
            WizardStep::Configuring => {
                prompt_connection(app, &theme).await?;
                app.dispatch(Msg::Next).await;

                if let Some(error) = &app.state.error {
                    println!("  {} {}", "✗".red(), error.red());
                    let retry = Confirm::with_theme(&theme)
                        .with_prompt("  Try again?")
                        .default(true)
                        .interact()?;
                    if !retry {
                        return Ok(());
                    }
                } else {
                    println!("  {} Connected", "✓".green());
                }
            }
            WizardStep::Uploading => {
                let actions = [WizardStep::Uploading.next_label(), "Back", "Quit"];
                let choice = Select::with_theme(&theme)
                    .with_prompt("  Action")
                    .items(&actions)
                    .default(0)
                    .interact()?;

                match choice {
                    0 => {
                        let path = prompt_file(app.state.file.as_ref(), &theme)?;
                        app.dispatch(Msg::FileSelected(path)).await;
                        println!("  {} Creating data extensions...", "→".cyan());
                        app.dispatch(Msg::Next).await;

                        if let Some(error) = &app.state.error {
                            println!("  {} {}", "✗".red(), error.red());
                        } else if let Some(notice) = &app.state.notice {
                            println!("  {} {}", "✓".green(), notice.green());
                        }
                    }
                    1 => app.dispatch(Msg::Back).await,
                    _ => return Ok(()),
                }
            }
        }
    }
}

fn print_step(step: WizardStep) {
    let filled = (step.progress() * PROGRESS_WIDTH as f64).round() as usize;
    println!();
    println!(
        "  [{}{}] Step {}/{}: {}",
        "#".repeat(filled).green(),
        "-".repeat(PROGRESS_WIDTH - filled).dimmed(),
        step.index() + 1,
        STEPS.len(),
        step.label().bold()
    );
    println!();
}

async fn prompt_connection<B: WizardBackend>(app: &mut WizardApp<B>, theme: &ColorfulTheme) -> Result<()> {
    let client_id: String = Input::with_theme(theme)
        .with_prompt("  Client ID")
        .with_initial_text(app.state.client_id.clone())
        .interact_text()?;

    let secret_prompt = if app.state.client_secret.is_empty() {
        "  Client Secret"
    } else {
        "  Client Secret (blank keeps current)"
    };
    let client_secret = Password::with_theme(theme)
        .with_prompt(secret_prompt)
        .allow_empty_password(!app.state.client_secret.is_empty())
        .interact()?;

    let auth_base_uri: String = Input::with_theme(theme)
        .with_prompt("  Auth Base URI")
        .with_initial_text(app.state.auth_base_uri.clone())
        .interact_text()?;

    let rest_base_uri: String = Input::with_theme(theme)
        .with_prompt("  REST Base URI (blank uses the token response)")
        .with_initial_text(app.state.rest_base_uri.clone())
        .allow_empty(true)
        .interact_text()?;

    app.dispatch(Msg::ClientIdChanged(client_id.trim().to_string())).await;
    if !client_secret.is_empty() {
        app.dispatch(Msg::ClientSecretChanged(client_secret)).await;
    }
    app.dispatch(Msg::AuthBaseUriChanged(auth_base_uri.trim().to_string())).await;
    app.dispatch(Msg::RestBaseUriChanged(rest_base_uri.trim().to_string())).await;
    Ok(())
}

fn prompt_file(current: Option<&PathBuf>, theme: &ColorfulTheme) -> Result<PathBuf> {
    let initial = current.map(|p| p.display().to_string()).unwrap_or_default();
    let path: String = Input::with_theme(theme)
        .with_prompt("  CSV or Excel file")
        .with_initial_text(initial)
        .validate_with(|input: &String| -> Result<(), String> {
            if PathBuf::from(input.trim()).is_file() {
                Ok(())
            } else {
                Err(format!("File not found: {}", input))
            }
        })
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}
