//! orgteams - manage an organization's teams, portals and team permissions

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod panel;

use cli::{Cli, Commands, GlobalOptions, PortalCommands, TeamCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        if let error::Error::Api(api) = &err
            && api.is_retryable()
        {
            eprintln!("  → This may be temporary; try again.");
        }
        std::process::exit(1);
    }
}

/// Warnings by default, debug with `--debug`; `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("orgteams version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Portal(PortalCommands::List) => cli::portal::list(&opts).await,
        Commands::Team(team_cmd) => match team_cmd {
            TeamCommands::Get { team_id } => cli::team::get(&opts, &team_id).await,
            TeamCommands::Create {
                name,
                grants,
                dry_run,
            } => cli::team::create(&opts, &name, grants, dry_run).await,
            TeamCommands::Edit {
                team_id,
                flags,
                interactive,
                dry_run,
            } => cli::team::edit(&opts, &team_id, flags, interactive, dry_run).await,
            TeamCommands::Delete {
                team_id,
                yes,
                dry_run,
            } => cli::team::delete(&opts, &team_id, yes, dry_run).await,
        },
        Commands::Settings => cli::settings::run(&opts).await,
    }
}
