//! Interactive team settings session
//!
//! Renders the panel's list, runs the create/edit modal as a sequence of
//! prompts, and asks for confirmation before deletes. All state lives in
//! the `TeamPanel`; this module only draws it and forwards choices.

use colored::Colorize;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use crate::cli::team::pick_permissions;
use crate::cli::{CommandContext, GlobalOptions};
use crate::client::SettingsApi;
use crate::client::models::Permission;
use crate::error::Result;
use crate::models::PortalDisplay;
use crate::output::spinner;
use crate::output::table::format_table;
use crate::panel::{
    Busy, EditOutcome, FormField, FormMode, ListView, MutationOutcome, NAME_HINT, NoticeLevel,
    SAVE_LABEL, TeamPanel,
};

const MENU: [&str; 6] = [
    "New team",
    "Edit team",
    "Delete team",
    "Reload",
    "Switch organization",
    "Quit",
];

/// Run the interactive settings session
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut panel = ctx.panel()?;
    let theme = ColorfulTheme::default();

    println!("{}", panel.context().breadcrumb().bold());
    load(&mut panel).await;

    loop {
        println!();
        render_list(&panel);
        print_notices(&mut panel);
        println!();

        let choice = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&MENU)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(0) => {
                if refuse_if_busy(panel.open_create()) {
                    continue;
                }
                run_modal(&mut panel, &theme).await?;
            }
            Some(1) => {
                if let Some(team_id) = pick_team(&panel, &theme, "Edit which team?")? {
                    let bar = spinner("Loading team...");
                    let outcome = panel.edit(&team_id).await;
                    bar.finish_and_clear();
                    match outcome {
                        EditOutcome::Opened => run_modal(&mut panel, &theme).await?,
                        EditOutcome::Busy => {
                            refuse_if_busy(Err(Busy));
                        }
                        _ => {}
                    }
                }
            }
            Some(2) => {
                if let Some(team_id) = pick_team(&panel, &theme, "Delete which team?")? {
                    delete(&mut panel, &team_id).await?;
                }
            }
            Some(3) => load(&mut panel).await,
            Some(4) => {
                let org_id: String = Input::with_theme(&theme)
                    .with_prompt("Organization ID")
                    .with_initial_text(panel.context().org_id.clone())
                    .interact_text()?;
                let context = match ctx.context_for(&org_id) {
                    Ok(context) => context,
                    Err(e) => {
                        println!("{} {}", "✗".red(), e);
                        continue;
                    }
                };
                let bar = spinner("Loading teams...");
                let reloaded = panel.switch_org(context).await;
                bar.finish_and_clear();
                if reloaded.is_some() {
                    println!("{}", panel.context().breadcrumb().bold());
                }
            }
            _ => break,
        }
    }

    Ok(())
}

async fn load<C: SettingsApi + ?Sized>(panel: &mut TeamPanel<C>) {
    let bar = spinner("Loading teams...");
    panel.reload().await;
    bar.finish_and_clear();
}

fn refuse_if_busy(result: std::result::Result<(), Busy>) -> bool {
    match result {
        Ok(()) => false,
        Err(busy) => {
            println!("{} {}", "⚠".yellow(), busy);
            true
        }
    }
}

fn render_list<C: SettingsApi + ?Sized>(panel: &TeamPanel<C>) {
    match panel.list().view() {
        ListView::Loading => println!("{}", "Loading teams...".dimmed()),
        ListView::Unavailable => {
            println!("{}", "Teams unavailable. Choose Reload to try again.".dimmed())
        }
        ListView::Empty => println!(
            "{}",
            "No teams yet. Choose \"New team\" to create one.".dimmed()
        ),
        ListView::Items(portals) => {
            let rows: Vec<PortalDisplay> = portals.iter().map(PortalDisplay::from).collect();
            println!("{}", format_table(&rows));
        }
    }
}

fn print_notices<C: SettingsApi + ?Sized>(panel: &mut TeamPanel<C>) {
    for notice in panel.take_notices() {
        match notice.level {
            NoticeLevel::Success => println!("{} {}", "✓".green(), notice.message),
            NoticeLevel::Error => println!("{} {}", "✗".red(), notice.message),
        }
    }
}

fn pick_team<C: SettingsApi + ?Sized>(
    panel: &TeamPanel<C>,
    theme: &ColorfulTheme,
    prompt: &str,
) -> Result<Option<String>> {
    let portals = panel.list().portals();
    if portals.is_empty() {
        println!("{}", "No teams to choose from.".dimmed());
        return Ok(None);
    }

    let items: Vec<String> = portals
        .iter()
        .map(|p| format!("{} ({})", p.name, p.id))
        .collect();
    let choice = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|idx| portals[idx].id.clone()))
}

/// Prompt through the open modal until it is saved or cancelled
async fn run_modal<C: SettingsApi + ?Sized>(
    panel: &mut TeamPanel<C>,
    theme: &ColorfulTheme,
) -> Result<()> {
    while panel.modal().is_visible() {
        println!();
        println!("{}", panel.modal().title().unwrap_or_default().bold());

        if panel.modal().mode() == Some(FormMode::Create) {
            if let Some(error) = panel.form().error_for(FormField::Name) {
                println!("  {} {}", "✗".red(), error);
            }
            let name: String = Input::with_theme(theme)
                .with_prompt(format!("Name ({})", NAME_HINT))
                .with_initial_text(panel.form().name.clone())
                .allow_empty(true)
                .interact_text()?;
            panel.set_name(name);
        }

        let picked = pick_permissions(&panel.form().flags)?;
        for permission in Permission::ALL {
            panel.set_flag(permission, picked.get(permission));
        }

        let action = Select::with_theme(theme)
            .items(&[SAVE_LABEL, "Cancel"])
            .default(0)
            .interact_opt()?;
        if action != Some(0) {
            panel.cancel();
            break;
        }

        let bar = spinner("Saving...");
        let outcome = panel.submit().await;
        bar.finish_and_clear();

        match outcome {
            MutationOutcome::Invalid(_) => continue,
            MutationOutcome::Failed(_) => {
                print_notices(panel);
                let retry = Confirm::with_theme(theme)
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    panel.cancel();
                }
            }
            _ => break,
        }
    }
    Ok(())
}

async fn delete<C: SettingsApi + ?Sized>(panel: &mut TeamPanel<C>, team_id: &str) -> Result<()> {
    let confirmation = match panel.request_delete(team_id) {
        Ok(confirmation) => confirmation,
        Err(busy) => {
            refuse_if_busy(Err(busy));
            return Ok(());
        }
    };

    let confirmed = Confirm::new()
        .with_prompt(confirmation.prompt())
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    let bar = spinner("Deleting...");
    panel.confirm_delete(confirmation).await;
    bar.finish_and_clear();
    Ok(())
}
