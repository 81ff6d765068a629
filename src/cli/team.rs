//! Team management commands
//!
//! Every mutation goes through the same panel the `settings` session uses,
//! so one-shot commands get identical validation and confirmation rules.

use colored::Colorize;
use dialoguer::{Confirm, MultiSelect, theme::ColorfulTheme};
use log::debug;
use serde::Serialize;

use crate::cli::{CommandContext, FlagArgs, GlobalOptions, GrantArgs, OutputFormat};
use crate::client::TeamApi;
use crate::client::models::{Permission, PermissionFlags};
use crate::error::{ApiError, Error, Result};
use crate::models::{TeamDisplay, permission_changes};
use crate::output::Formattable;
use crate::output::json::print_json;
use crate::output::table::format_table;
use crate::panel::{
    EditOutcome, FormMode, MutationOutcome, NoticeLevel, TEAM_GONE, TeamPanel, ValidTeamForm,
    validate,
};

impl GrantArgs {
    pub fn flags(&self) -> PermissionFlags {
        PermissionFlags {
            manage_workspace: self.manage_workspace,
            manage_module: self.manage_module,
            manage_provider: self.manage_provider,
            manage_vcs: self.manage_vcs,
            manage_template: self.manage_template,
        }
    }
}

impl FlagArgs {
    fn value(&self, permission: Permission) -> Option<bool> {
        match permission {
            Permission::Workspace => self.manage_workspace,
            Permission::Module => self.manage_module,
            Permission::Provider => self.manage_provider,
            Permission::Vcs => self.manage_vcs,
            Permission::Template => self.manage_template,
        }
    }

    pub fn is_empty(&self) -> bool {
        Permission::ALL.iter().all(|p| self.value(*p).is_none())
    }

    /// Explicit changes as (permission, value) pairs
    pub fn changes(&self) -> Vec<(Permission, bool)> {
        Permission::ALL
            .into_iter()
            .filter_map(|p| self.value(p).map(|v| (p, v)))
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct DeletedTeam<'a> {
    deleted: bool,
    team_id: &'a str,
}

/// Turn a non-success outcome into the error the command exits with
fn outcome_error(outcome: MutationOutcome) -> Error {
    match outcome {
        MutationOutcome::Invalid(errors) => Error::Validation(errors),
        MutationOutcome::Failed(e) => e,
        MutationOutcome::Gone(team_id) => {
            ApiError::NotFound(format!("{} ({})", TEAM_GONE, team_id)).into()
        }
        MutationOutcome::Busy => Error::Other("another change is still being saved".to_string()),
        other => Error::Other(format!("unexpected result: {:?}", other)),
    }
}

/// Print notices the panel raised besides the command's own result, such as
/// a failed reload after a successful change.
fn report_warnings<C: crate::client::SettingsApi + ?Sized>(panel: &mut TeamPanel<C>) {
    for notice in panel.take_notices() {
        if notice.level == NoticeLevel::Error {
            eprintln!("{} {}", "⚠".yellow(), notice.message);
        }
    }
}

// ============================================================================
// Get Command
// ============================================================================

/// Show a team and its permissions
pub async fn get(opts: &GlobalOptions, team_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let org_id = ctx.require_org_id()?;

    let team = ctx.client.get_team(org_id, team_id).await?;
    TeamDisplay::from(&team).print(ctx.format)
}

// ============================================================================
// Create Command
// ============================================================================

/// Create a new team
pub async fn create(opts: &GlobalOptions, name: &str, grants: GrantArgs, dry_run: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut panel = ctx.panel()?;

    panel.open_create()?;
    panel.set_name(name);
    for permission in Permission::ALL {
        panel.set_flag(permission, grants.flags().get(permission));
    }

    if dry_run {
        let request = match validate(panel.form(), FormMode::Create) {
            Ok(ValidTeamForm::Create(request)) => request,
            Ok(_) => return Err(Error::Other("create form produced an update".to_string())),
            Err(errors) => return Err(Error::Validation(errors)),
        };
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        eprintln!("Would create team: {}", request.name.bold());
        let granted = request.flags.granted();
        if granted.is_empty() {
            eprintln!("Permissions: {}", "(none)".dimmed());
        } else {
            for p in granted {
                eprintln!("  • {}", p.label());
            }
        }
        return Ok(());
    }

    let team = match panel.submit().await {
        MutationOutcome::Created(team) => team,
        other => return Err(outcome_error(other)),
    };
    debug!("Created team {} ({})", team.name, team.id);
    report_warnings(&mut panel);

    match ctx.format {
        OutputFormat::Json => print_json(&TeamDisplay::from(&team))?,
        _ => {
            eprintln!(
                "{} Team \"{}\" created (ID: {})",
                "✓".green(),
                team.name,
                team.id
            );
            eprintln!("→ Change permissions: orgteams team edit {} --interactive", team.id);
        }
    }

    Ok(())
}

// ============================================================================
// Edit Command
// ============================================================================

/// Checklist of permissions, pre-selected with the current values
pub(crate) fn pick_permissions(current: &PermissionFlags) -> Result<PermissionFlags> {
    let items: Vec<String> = Permission::ALL
        .iter()
        .map(|p| format!("{} - {}", p.label(), p.help()))
        .collect();
    let defaults: Vec<bool> = Permission::ALL.iter().map(|p| current.get(*p)).collect();

    let selected = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Permissions (space to toggle, enter to confirm)")
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    let mut flags = PermissionFlags::default();
    for idx in selected {
        flags.set(Permission::ALL[idx], true);
    }
    Ok(flags)
}

/// Change a team's permission flags
pub async fn edit(
    opts: &GlobalOptions,
    team_id: &str,
    changes: FlagArgs,
    interactive: bool,
    dry_run: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut panel = ctx.panel()?;

    match panel.edit(team_id).await {
        EditOutcome::Opened => {}
        EditOutcome::Gone => {
            return Err(ApiError::NotFound(format!("{} ({})", TEAM_GONE, team_id)).into());
        }
        EditOutcome::Failed(e) => return Err(e),
        other => return Err(Error::Other(format!("could not open team: {:?}", other))),
    }

    let current = panel.form().flags;
    let display_name = panel.modal().display_name().unwrap_or(team_id).to_string();

    if interactive {
        eprintln!("{}", panel.modal().title().unwrap_or_default().bold());
        let picked = pick_permissions(&current)?;
        for permission in Permission::ALL {
            panel.set_flag(permission, picked.get(permission));
        }
    } else if changes.is_empty() {
        return Err(Error::Other(
            "Nothing to change. Pass --manage-* flags or --interactive".to_string(),
        ));
    }
    for (permission, value) in changes.changes() {
        panel.set_flag(permission, value);
    }
    let proposed = panel.form().flags;

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        eprintln!("Would update team: \"{}\" (ID: {})", display_name, team_id);
        eprintln!("{}", format_table(&permission_changes(&current, &proposed)));
        panel.cancel();
        return Ok(());
    }

    let team = match panel.submit().await {
        MutationOutcome::Updated(team) => team,
        other => return Err(outcome_error(other)),
    };
    report_warnings(&mut panel);

    match ctx.format {
        OutputFormat::Json => print_json(&TeamDisplay::from(&team))?,
        _ => {
            eprintln!(
                "{} Permissions of team \"{}\" saved",
                "✓".green(),
                display_name
            );
            if ctx.format == OutputFormat::Table {
                TeamDisplay::from(&team).print(ctx.format)?;
            }
        }
    }

    Ok(())
}

// ============================================================================
// Delete Command
// ============================================================================

/// Delete a team after confirmation
pub async fn delete(opts: &GlobalOptions, team_id: &str, yes: bool, dry_run: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let org_id = ctx.require_org_id()?.to_string();
    let mut panel = ctx.panel()?;

    if dry_run {
        let team = ctx.client.get_team(&org_id, team_id).await?;
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        eprintln!("Would delete team: \"{}\" (ID: {})", team.name, team.id);
        let granted = team.flags.granted();
        eprintln!(
            "  Permissions: {} would be removed with it",
            granted.len()
        );
        return Ok(());
    }

    let confirmation = panel.request_delete(team_id)?;

    // --yes counts as the explicit confirmation
    if !yes {
        let team = ctx.client.get_team(&org_id, confirmation.team_id()).await?;
        eprintln!(
            "{} Delete team \"{}\" (ID: {})?",
            "⚠".yellow(),
            team.name,
            team.id
        );
        eprintln!();

        let confirm = Confirm::new()
            .with_prompt(confirmation.prompt())
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let deleted_id = match panel.confirm_delete(confirmation).await {
        MutationOutcome::Deleted(id) => id,
        other => return Err(outcome_error(other)),
    };
    report_warnings(&mut panel);

    match ctx.format {
        OutputFormat::Json => print_json(&DeletedTeam {
            deleted: true,
            team_id: &deleted_id,
        })?,
        _ => eprintln!("{} Team {} deleted", "✓".green(), deleted_id),
    }

    Ok(())
}
