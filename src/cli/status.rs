//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Show the last four characters of a token
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "orgteams Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            match opts.api_host_ref().or(config.api_host.as_deref()) {
                Some(host) => println!("{} API host: {}", "✓".green(), host.cyan()),
                None => {
                    println!("{} API host not configured", "✗".red());
                    println!("  → Run 'orgteams init' to configure");
                }
            }

            match config.api_token.as_deref() {
                Some(token) if !token.is_empty() => {
                    println!("{} API token configured ({})", "✓".green(), mask_token(token))
                }
                _ => println!("{} No API token (requests are sent unauthenticated)", "○".dimmed()),
            }

            match opts.org_ref().or(config.org_id.as_deref()) {
                Some(org_id) => {
                    println!("{} Default organization: {}", "✓".green(), org_id);
                    if let Some(name) = &config.org_name {
                        println!("  Name: {}", name);
                    }
                }
                None => {
                    println!("{} No default organization set", "○".dimmed());
                    println!("  → Pass --org or run 'orgteams init'");
                }
            }

            println!(
                "{} Request timeout: {}s",
                "○".dimmed(),
                opts.timeout.unwrap_or(config.preferences.timeout_secs)
            );
            if let Some(format) = &config.preferences.format {
                println!("{} Default format: {}", "○".dimmed(), format);
            }

            println!();
        }
        Err(crate::error::Error::Config(crate::error::ConfigError::NotFound)) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "orgteams init".cyan()
            );
            println!();
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
