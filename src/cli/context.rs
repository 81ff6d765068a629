//! Command execution context
//!
//! Loads the config file, merges the command-line and environment overrides
//! into it, and builds the API client every remote command needs.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::RestClient;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::panel::{PanelContext, TeamPanel};

/// Context for command execution containing config, client, and output format.
pub struct CommandContext {
    /// Configuration with all overrides applied
    pub config: Config,
    /// API client shared with the panel
    pub client: Arc<RestClient>,
    /// Resolved output format
    pub format: OutputFormat,
    /// Organization ID from the config file, which `org_name` belongs to
    configured_org: Option<String>,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is fine as long as the flags and environment
    /// supply an API host.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be parsed or no usable API
    /// host is configured.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let file_config = Config::load_or_default(opts.config_ref())?;
        let file_org = file_config.org_id.clone();
        let config = apply_overrides(file_config, opts);

        let api_host = config.require_api_host()?;
        let timeout = Duration::from_secs(config.preferences.timeout_secs);
        debug!("Using API host {} (timeout {:?})", api_host, timeout);

        let client = Arc::new(RestClient::new(&api_host, config.api_token.clone(), timeout)?);
        let format = resolve_format(opts.format, &config);

        Ok(Self {
            config,
            client,
            format,
            configured_org: file_org,
        })
    }

    /// Get the organization ID, returning an error if not set.
    pub fn require_org_id(&self) -> Result<&str> {
        self.config.require_org_id()
    }

    /// Panel context for the resolved organization.
    pub fn panel_context(&self) -> Result<PanelContext> {
        self.context_for(self.require_org_id()?)
    }

    /// Panel context for `org_id`.
    ///
    /// The configured display name only applies to the configured
    /// organization, not to one given with `--org` or picked later.
    pub fn context_for(&self, org_id: &str) -> Result<PanelContext> {
        let org_id = org_id.trim();
        if org_id.is_empty() {
            return Err(
                ConfigError::Invalid("Organization ID cannot be empty".to_string()).into(),
            );
        }

        let org_name = if self.configured_org.as_deref() == Some(org_id) {
            self.config.org_name.clone()
        } else {
            None
        };
        Ok(PanelContext::new(org_id).with_name(org_name))
    }

    /// A fresh, unmounted panel for the resolved organization.
    pub fn panel(&self) -> Result<TeamPanel<RestClient>> {
        Ok(TeamPanel::new(Arc::clone(&self.client), self.panel_context()?))
    }
}

/// Merge command-line and environment values over the config file
fn apply_overrides(mut config: Config, opts: &GlobalOptions) -> Config {
    if let Some(host) = &opts.api_host {
        config.api_host = Some(host.clone());
    }
    if let Some(token) = &opts.token {
        config.api_token = Some(token.clone());
    }
    if let Some(org) = &opts.org {
        config.org_id = Some(org.clone());
    }
    if let Some(timeout) = opts.timeout {
        config.preferences.timeout_secs = timeout;
    }
    config
}

fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or_else(|| {
        config
            .preferences
            .format
            .as_deref()
            .and_then(OutputFormat::from_config)
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preferences;
    use tempfile::tempdir;

    fn file_config() -> Config {
        Config {
            api_host: Some("https://api.example.com".to_string()),
            api_token: Some("file-token".to_string()),
            org_id: Some("org-file".to_string()),
            org_name: Some("Acme".to_string()),
            preferences: Preferences {
                format: Some("table".to_string()),
                timeout_secs: 30,
            },
        }
    }

    #[test]
    fn test_overrides_win_over_file() {
        let opts = GlobalOptions {
            api_host: Some("http://localhost:9000".to_string()),
            token: Some("env-token".to_string()),
            org: Some("org-flag".to_string()),
            timeout: Some(3),
            ..GlobalOptions::default()
        };

        let config = apply_overrides(file_config(), &opts);

        assert_eq!(config.api_host.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.api_token.as_deref(), Some("env-token"));
        assert_eq!(config.org_id.as_deref(), Some("org-flag"));
        assert_eq!(config.preferences.timeout_secs, 3);
    }

    #[test]
    fn test_file_values_kept_without_overrides() {
        let config = apply_overrides(file_config(), &GlobalOptions::default());

        assert_eq!(config.org_id.as_deref(), Some("org-file"));
        assert_eq!(config.api_token.as_deref(), Some("file-token"));
    }

    #[test]
    fn test_format_precedence() {
        let config = file_config();
        assert_eq!(resolve_format(Some(OutputFormat::Json), &config), OutputFormat::Json);
        assert_eq!(resolve_format(None, &config), OutputFormat::Table);
        assert_eq!(resolve_format(None, &Config::default()), OutputFormat::Pretty);
    }

    #[test]
    fn test_context_from_file_keeps_org_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        file_config().save_to(path.clone()).unwrap();

        let opts = GlobalOptions {
            config: path.to_str().map(String::from),
            ..GlobalOptions::default()
        };
        let ctx = CommandContext::new(&opts).unwrap();

        let panel_ctx = ctx.panel_context().unwrap();
        assert_eq!(panel_ctx.breadcrumb(), "Acme / Settings / Teams");
    }

    #[test]
    fn test_org_override_drops_configured_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        file_config().save_to(path.clone()).unwrap();

        let opts = GlobalOptions {
            config: path.to_str().map(String::from),
            org: Some("org-other".to_string()),
            ..GlobalOptions::default()
        };
        let ctx = CommandContext::new(&opts).unwrap();

        let panel_ctx = ctx.panel_context().unwrap();
        assert_eq!(panel_ctx.org_id, "org-other");
        assert_eq!(panel_ctx.org_name, None);
    }

    #[test]
    fn test_context_for_switched_org() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        file_config().save_to(path.clone()).unwrap();

        let opts = GlobalOptions {
            config: path.to_str().map(String::from),
            org: Some("org-other".to_string()),
            ..GlobalOptions::default()
        };
        let ctx = CommandContext::new(&opts).unwrap();

        let back_home = ctx.context_for(" org-file ").unwrap();
        assert_eq!(back_home.org_id, "org-file");
        assert_eq!(back_home.org_name.as_deref(), Some("Acme"));

        let elsewhere = ctx.context_for("org-third").unwrap();
        assert_eq!(elsewhere.org_name, None);

        let err = ctx.context_for("   ").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_api_host_is_an_error() {
        let dir = tempdir().unwrap();
        let opts = GlobalOptions {
            config: dir.path().join("absent.yaml").to_str().map(String::from),
            ..GlobalOptions::default()
        };

        let err = CommandContext::new(&opts).err().unwrap();
        assert!(err.to_string().contains("orgteams init"));
    }
}
