//! Display models for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::models::{Permission, PermissionFlags, Portal, Team};
use crate::error::Result;
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::output::table::format_table;

/// Portal display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PortalDisplay {
    #[tabled(rename = "TEAM ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<&Portal> for PortalDisplay {
    fn from(portal: &Portal) -> Self {
        Self {
            id: portal.id.clone(),
            name: portal.name.clone(),
        }
    }
}

/// One permission switch as a table row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PermissionRow {
    #[tabled(rename = "PERMISSION")]
    pub label: &'static str,

    #[tabled(rename = "ATTRIBUTE")]
    pub attribute: &'static str,

    #[tabled(rename = "GRANTED")]
    pub granted: bool,
}

/// Rows for every permission, in form order
pub fn permission_rows(flags: &PermissionFlags) -> Vec<PermissionRow> {
    Permission::ALL
        .into_iter()
        .map(|p| PermissionRow {
            label: p.label(),
            attribute: p.wire_name(),
            granted: flags.get(p),
        })
        .collect()
}

/// Team with its permissions.
///
/// JSON carries the flags under their wire names.
#[derive(Debug, Clone, Serialize)]
pub struct TeamDisplay {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub flags: PermissionFlags,
}

impl From<&Team> for TeamDisplay {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.clone(),
            name: team.name.clone(),
            flags: team.flags,
        }
    }
}

impl Formattable for TeamDisplay {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => {
                let mut lines = Vec::new();
                let name = if self.name.is_empty() { "--" } else { &self.name };
                lines.push(format!("{}: {}", "Team".bold(), name));
                lines.push(format!("{}: {}", "ID".dimmed(), self.id));
                lines.push(String::new());
                lines.push(format!("{}:", "Permissions".bold()));
                for p in Permission::ALL {
                    let mark = if self.flags.get(p) {
                        "✓".green()
                    } else {
                        "✗".red()
                    };
                    lines.push(format!("  {} {}", mark, p.label()));
                }
                Ok(lines.join("\n"))
            }
            OutputFormat::Table => Ok(format_table(&permission_rows(&self.flags))),
            OutputFormat::Json => Ok(format_json(self)?),
        }
    }
}

/// Before/after value of one permission, for dry runs
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PermissionChange {
    #[tabled(rename = "PERMISSION")]
    pub label: &'static str,

    #[tabled(rename = "CURRENT")]
    pub current: bool,

    #[tabled(rename = "NEW")]
    pub new: bool,
}

/// Every permission with its current and proposed value
pub fn permission_changes(current: &PermissionFlags, new: &PermissionFlags) -> Vec<PermissionChange> {
    Permission::ALL
        .into_iter()
        .map(|p| PermissionChange {
            label: p.label(),
            current: current.get(p),
            new: new.get(p),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team {
            id: "t-42".to_string(),
            name: "platform".to_string(),
            flags: PermissionFlags::default().with(Permission::Vcs, true),
        }
    }

    #[test]
    fn test_portal_display_from_portal() {
        let portal = Portal {
            id: "t-1".to_string(),
            name: "dev".to_string(),
        };

        let display = PortalDisplay::from(&portal);

        assert_eq!(display.id, "t-1");
        assert_eq!(display.name, "dev");
    }

    #[test]
    fn test_permission_rows_cover_all_permissions() {
        let rows = permission_rows(&team().flags);

        assert_eq!(rows.len(), 5);
        let vcs = rows.iter().find(|r| r.attribute == "manageVcs").unwrap();
        assert!(vcs.granted);
        assert!(rows.iter().filter(|r| r.granted).count() == 1);
    }

    #[test]
    fn test_team_display_json_uses_wire_names() {
        let out = TeamDisplay::from(&team()).format(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["data"]["id"], "t-42");
        assert_eq!(value["data"]["manageVcs"], true);
        assert_eq!(value["data"]["manageTemplate"], false);
    }

    #[test]
    fn test_team_display_pretty_lists_labels() {
        colored::control::set_override(false);
        let out = TeamDisplay::from(&team()).format(OutputFormat::Pretty).unwrap();

        assert!(out.contains("platform"));
        assert!(out.contains("✓ Manage VCS Settings"));
        assert!(out.contains("✗ Manage Templates"));
    }

    #[test]
    fn test_permission_changes() {
        let current = PermissionFlags::default().with(Permission::Vcs, true);
        let new = current.with(Permission::Template, true);

        let changes = permission_changes(&current, &new);
        let template = changes.iter().find(|c| c.label == "Manage Templates").unwrap();
        assert!(!template.current);
        assert!(template.new);
    }
}
