//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, if given on the command line or in the environment
    pub format: Option<OutputFormat>,

    /// Organization ID override
    pub org: Option<String>,

    /// Custom config file path (defaults to ~/.orgteams/config.yaml)
    pub config: Option<String>,

    /// API host override
    pub api_host: Option<String>,

    /// API token override
    pub token: Option<String>,

    /// Request timeout override in seconds
    pub timeout: Option<u64>,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            org: cli.org.clone(),
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
            token: cli.token.clone(),
            timeout: cli.timeout,
        }
    }

    pub fn org_ref(&self) -> Option<&str> {
        self.org.as_deref()
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}
