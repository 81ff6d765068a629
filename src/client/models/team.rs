//! Team and permission models

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::envelope::Resource;

/// JSON:API resource type for teams
pub const TEAM_TYPE: &str = "team";

/// One organization-level capability a team can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Workspace,
    Module,
    Provider,
    Vcs,
    Template,
}

impl Permission {
    /// Every permission, in the order the form presents them.
    pub const ALL: [Permission; 5] = [
        Permission::Workspace,
        Permission::Module,
        Permission::Provider,
        Permission::Vcs,
        Permission::Template,
    ];

    /// Attribute name on the wire
    pub fn wire_name(&self) -> &'static str {
        match self {
            Permission::Workspace => "manageWorkspace",
            Permission::Module => "manageModule",
            Permission::Provider => "manageProvider",
            Permission::Vcs => "manageVcs",
            Permission::Template => "manageTemplate",
        }
    }

    /// Switch label
    pub fn label(&self) -> &'static str {
        match self {
            Permission::Workspace => "Manage Workspaces",
            Permission::Module => "Manage Modules",
            Permission::Provider => "Manage Providers",
            Permission::Vcs => "Manage VCS Settings",
            Permission::Template => "Manage Templates",
        }
    }

    /// Help text shown next to the switch
    pub fn help(&self) -> &'static str {
        match self {
            Permission::Workspace => {
                "Allow members to create and administrate all workspaces within the organization"
            }
            Permission::Module => {
                "Allow members to create and administrate all modules within the organization"
            }
            Permission::Provider => {
                "Allow members to create and administrate all providers within the organization"
            }
            Permission::Vcs => {
                "Allow members to create and administrate all VCS Settings within the organization"
            }
            Permission::Template => {
                "Allow members to create and administrate all Templates within the organization"
            }
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The five permission switches attached to a team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionFlags {
    #[serde(default, deserialize_with = "null_as_false")]
    pub manage_workspace: bool,

    #[serde(default, deserialize_with = "null_as_false")]
    pub manage_module: bool,

    #[serde(default, deserialize_with = "null_as_false")]
    pub manage_provider: bool,

    #[serde(default, deserialize_with = "null_as_false")]
    pub manage_vcs: bool,

    #[serde(default, deserialize_with = "null_as_false")]
    pub manage_template: bool,
}

/// The backend leaves unset switches as `null`
fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl PermissionFlags {
    pub fn get(&self, permission: Permission) -> bool {
        match permission {
            Permission::Workspace => self.manage_workspace,
            Permission::Module => self.manage_module,
            Permission::Provider => self.manage_provider,
            Permission::Vcs => self.manage_vcs,
            Permission::Template => self.manage_template,
        }
    }

    pub fn set(&mut self, permission: Permission, value: bool) {
        let slot = match permission {
            Permission::Workspace => &mut self.manage_workspace,
            Permission::Module => &mut self.manage_module,
            Permission::Provider => &mut self.manage_provider,
            Permission::Vcs => &mut self.manage_vcs,
            Permission::Template => &mut self.manage_template,
        };
        *slot = value;
    }

    /// Builder-style variant of [`set`](Self::set)
    #[cfg(test)]
    pub fn with(mut self, permission: Permission, value: bool) -> Self {
        self.set(permission, value);
        self
    }

    /// Permissions that are switched on
    pub fn granted(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| self.get(*p))
            .collect()
    }
}

/// Attributes of a team resource as returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub flags: PermissionFlags,
}

/// Organization team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team ID
    pub id: String,

    /// Team name (fixed at creation)
    pub name: String,

    /// Permission switches
    #[serde(flatten)]
    pub flags: PermissionFlags,
}

impl Team {
    /// Build a team from a resource object.
    ///
    /// `fallback_id` is used when the backend omits `id` from the resource.
    pub fn from_resource(resource: Resource<TeamAttributes>, fallback_id: &str) -> Self {
        let id = if resource.id.is_empty() {
            fallback_id.to_string()
        } else {
            resource.id
        };

        Self {
            id,
            name: resource.attributes.name.unwrap_or_default(),
            flags: resource.attributes.flags,
        }
    }
}

/// Attributes sent when creating a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTeamRequest {
    pub name: String,

    #[serde(flatten)]
    pub flags: PermissionFlags,
}

/// Attributes sent when updating a team (the name is immutable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateTeamRequest {
    #[serde(flatten)]
    pub flags: PermissionFlags,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Document;
    use serde_json::json;

    #[test]
    fn test_flags_serialize_camel_case() {
        let flags = PermissionFlags::default().with(Permission::Vcs, true);
        let value = serde_json::to_value(flags).unwrap();

        assert_eq!(value["manageVcs"], true);
        assert_eq!(value["manageWorkspace"], false);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_flags_null_and_missing_default_false() {
        let flags: PermissionFlags =
            serde_json::from_value(json!({ "manageModule": null, "manageVcs": true })).unwrap();

        assert!(!flags.manage_module);
        assert!(!flags.manage_workspace);
        assert!(flags.manage_vcs);
    }

    #[test]
    fn test_flags_get_set_cover_every_permission() {
        let mut flags = PermissionFlags::default();
        for permission in Permission::ALL {
            assert!(!flags.get(permission));
            flags.set(permission, true);
            assert!(flags.get(permission));
        }
        assert_eq!(flags.granted().len(), 5);
    }

    #[test]
    fn test_team_from_resource_document() {
        let doc: Document<Option<Resource<TeamAttributes>>> = serde_json::from_value(json!({
            "data": {
                "type": "team",
                "id": "t-42",
                "attributes": {
                    "name": "platform",
                    "manageVcs": true,
                    "manageProvider": false
                }
            }
        }))
        .unwrap();

        let team = Team::from_resource(doc.data.unwrap(), "ignored");
        assert_eq!(team.id, "t-42");
        assert_eq!(team.name, "platform");
        assert!(team.flags.manage_vcs);
        assert!(!team.flags.manage_template);
    }

    #[test]
    fn test_team_from_resource_without_id_uses_fallback() {
        let doc: Document<Option<Resource<TeamAttributes>>> = serde_json::from_value(json!({
            "data": { "attributes": { "manageWorkspace": true } }
        }))
        .unwrap();

        let team = Team::from_resource(doc.data.unwrap(), "t-1");
        assert_eq!(team.id, "t-1");
        assert_eq!(team.name, "");
        assert!(team.flags.manage_workspace);
    }

    #[test]
    fn test_create_request_attributes_include_name() {
        let request = CreateTeamRequest {
            name: "ops".to_string(),
            flags: PermissionFlags::default().with(Permission::Module, true),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["name"], "ops");
        assert_eq!(value["manageModule"], true);
    }

    #[test]
    fn test_update_request_attributes_omit_name() {
        let request = UpdateTeamRequest {
            flags: PermissionFlags::default(),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("name").is_none());
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
