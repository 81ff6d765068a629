//! Portal list command

use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::models::PortalDisplay;
use crate::output::{Formattable, spinner};
use crate::panel::{ListView, LoadOutcome};

/// List the teams of the current organization
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut panel = ctx.panel()?;
    debug!("Listing portals for {}", panel.context().breadcrumb());

    let bar = spinner("Loading teams...");
    let outcome = panel.mount().await;
    bar.finish_and_clear();

    match outcome {
        LoadOutcome::Failed(e) => return Err(e),
        LoadOutcome::Loaded(count) => debug!("Loaded {} teams", count),
        LoadOutcome::Superseded => {}
    }

    let rows: Vec<PortalDisplay> = panel
        .list()
        .portals()
        .iter()
        .map(PortalDisplay::from)
        .collect();

    match panel.list().view() {
        ListView::Empty if ctx.format != OutputFormat::Json => {
            eprintln!("No teams found");
        }
        _ => rows.print(ctx.format)?,
    }

    Ok(())
}
