//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};

pub mod args;
pub mod context;
pub mod init;
pub mod portal;
pub mod settings;
pub mod status;
pub mod team;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// orgteams - manage organization teams and their permissions
#[derive(Parser, Debug)]
#[command(name = "orgteams")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "ORGTEAMS_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override default organization
    #[arg(long, global = true, env = "ORGTEAMS_ORG_ID", hide_env = true)]
    pub org: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "ORGTEAMS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override API host (e.g. https://api.example.com)
    #[arg(long, global = true, env = "ORGTEAMS_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// API token (prefer the environment variable)
    #[arg(
        long,
        global = true,
        env = "ORGTEAMS_TOKEN",
        hide = true,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ORGTEAMS_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize orgteams configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// List the organization's teams
    #[command(subcommand)]
    Portal(PortalCommands),

    /// Create, edit and delete teams
    #[command(subcommand)]
    Team(TeamCommands),

    /// Interactive team settings panel
    #[command(after_help = "EXAMPLES:\n  \
            orgteams settings                 # Default organization\n  \
            orgteams settings --org org-42    # Another organization")]
    Settings,
}

/// Portal subcommands
#[derive(Subcommand, Debug)]
pub enum PortalCommands {
    /// List teams of the current organization
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            orgteams portal list\n  \
            orgteams portal list --format json | jq '.data[].id'"
    )]
    List,
}

/// Permission switches for `team create`
#[derive(Debug, Clone, Copy, Args, Default)]
pub struct GrantArgs {
    /// Allow members to administrate all workspaces
    #[arg(long)]
    pub manage_workspace: bool,

    /// Allow members to administrate all modules
    #[arg(long)]
    pub manage_module: bool,

    /// Allow members to administrate all providers
    #[arg(long)]
    pub manage_provider: bool,

    /// Allow members to administrate all VCS settings
    #[arg(long)]
    pub manage_vcs: bool,

    /// Allow members to administrate all templates
    #[arg(long)]
    pub manage_template: bool,
}

/// Permission changes for `team edit`; omitted switches keep their value
#[derive(Debug, Clone, Copy, Args, Default)]
pub struct FlagArgs {
    /// Set workspace management (true/false)
    #[arg(long, value_name = "BOOL")]
    pub manage_workspace: Option<bool>,

    /// Set module management (true/false)
    #[arg(long, value_name = "BOOL")]
    pub manage_module: Option<bool>,

    /// Set provider management (true/false)
    #[arg(long, value_name = "BOOL")]
    pub manage_provider: Option<bool>,

    /// Set VCS settings management (true/false)
    #[arg(long, value_name = "BOOL")]
    pub manage_vcs: Option<bool>,

    /// Set template management (true/false)
    #[arg(long, value_name = "BOOL")]
    pub manage_template: Option<bool>,
}

/// Team subcommands
#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// Show a team and its permissions
    #[command(
        visible_alias = "g",
        after_help = "EXAMPLES:\n  \
            orgteams team get t-42\n  \
            orgteams team get t-42 --format json | jq '.data.manageVcs'"
    )]
    Get {
        /// Team ID
        team_id: String,
    },

    /// Create a new team
    #[command(after_help = "EXAMPLES:\n  \
            orgteams team create platform                       # No permissions\n  \
            orgteams team create platform --manage-vcs          # With one permission\n  \
            orgteams team create platform --dry-run             # Preview only")]
    Create {
        /// Team name (must be a valid AD group name)
        name: String,

        #[command(flatten)]
        grants: GrantArgs,

        /// Preview without creating
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Change a team's permissions
    #[command(after_help = "EXAMPLES:\n  \
            orgteams team edit t-42 --manage-template true\n  \
            orgteams team edit t-42 --manage-vcs false --dry-run\n  \
            orgteams team edit t-42 --interactive")]
    Edit {
        /// Team ID
        team_id: String,

        #[command(flatten)]
        flags: FlagArgs,

        /// Pick permissions from a checklist
        #[arg(long, short = 'i')]
        interactive: bool,

        /// Preview without saving
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Delete a team and its permissions
    #[command(after_help = "EXAMPLES:\n  \
            orgteams team delete t-7           # With confirmation\n  \
            orgteams team delete t-7 --yes     # Skip confirmation\n  \
            orgteams team delete t-7 --dry-run # Preview")]
    Delete {
        /// Team ID
        team_id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Preview without deleting
        #[arg(long, short = 'n')]
        dry_run: bool,
    },
}
