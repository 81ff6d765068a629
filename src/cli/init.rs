//! Init command implementation

use std::time::Duration;

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::{PortalApi, RestClient};
use crate::config::Config;
use crate::error::Result;
use crate::output::spinner;

/// Run the init command
///
/// Prompts for the API host, token and default organization, checks that
/// the organization's teams can be listed, and writes the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut config = Config::load_or_default(opts.config_ref())?;

    println!("{}", "Welcome to orgteams!".bold().green());
    println!("Let's set up access to your organization.\n");

    let default_host = opts
        .api_host
        .clone()
        .or_else(|| config.api_host.clone())
        .unwrap_or_default();
    let host: String = Input::with_theme(&theme)
        .with_prompt("API host (https://...)")
        .with_initial_text(default_host)
        .interact_text()?;
    config.api_host = Some(host.trim().to_string());
    let api_host = config.require_api_host()?;
    config.api_host = Some(api_host.clone());

    let token = Password::with_theme(&theme)
        .with_prompt("API token (leave empty for none)")
        .allow_empty_password(true)
        .interact()?;
    config.api_token = if token.is_empty() { None } else { Some(token) };

    let org_id: String = Input::with_theme(&theme)
        .with_prompt("Default organization ID")
        .with_initial_text(opts.org.clone().or_else(|| config.org_id.clone()).unwrap_or_default())
        .interact_text()?;
    config.org_id = Some(org_id.trim().to_string());

    let org_name: String = Input::with_theme(&theme)
        .with_prompt("Organization display name (optional)")
        .with_initial_text(config.org_name.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    config.org_name = Some(org_name.trim().to_string()).filter(|n| !n.is_empty());

    if let Some(timeout) = opts.timeout {
        config.preferences.timeout_secs = timeout;
    }

    // Verify the settings before saving them
    let client = RestClient::new(
        &api_host,
        config.api_token.clone(),
        Duration::from_secs(config.preferences.timeout_secs),
    )?;
    let org_id = config.require_org_id()?.to_string();
    let bar = spinner("Checking access...");
    let check = client.list_portals(&org_id).await;
    bar.finish_and_clear();

    match check {
        Ok(portals) => println!(
            "{} Access confirmed ({} teams found)",
            "✓".green(),
            portals.len()
        ),
        Err(e) => {
            println!("{} Could not list teams: {}", "⚠".yellow(), e);
            let save = Confirm::with_theme(&theme)
                .with_prompt("Save the configuration anyway?")
                .default(false)
                .interact()?;
            if !save {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    println!("  Default organization: {}", org_id.bold());

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "orgteams status".cyan());
    println!("  {} - List teams", "orgteams portal list".cyan());
    println!("  {} - Open the settings panel", "orgteams settings".cyan());

    Ok(())
}
