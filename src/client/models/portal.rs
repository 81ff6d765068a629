//! Portal models

use serde::{Deserialize, Serialize};

use super::envelope::Resource;

/// Attributes of a portal resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalAttributes {
    #[serde(default)]
    pub name: String,
}

/// Portal list entry; shares its identifier with the team it represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    /// Portal ID (same as the team ID)
    pub id: String,

    /// Display name
    pub name: String,
}

impl From<Resource<PortalAttributes>> for Portal {
    fn from(resource: Resource<PortalAttributes>) -> Self {
        Self {
            id: resource.id,
            name: resource.attributes.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Document;
    use serde_json::json;

    #[test]
    fn test_portal_collection_document() {
        let doc: Document<Vec<Resource<PortalAttributes>>> = serde_json::from_value(json!({
            "data": [
                { "type": "portal", "id": "t-1", "attributes": { "name": "dev", "extra": 1 } },
                { "type": "portal", "id": "t-2", "attributes": { "name": "ops" } }
            ]
        }))
        .unwrap();

        let portals: Vec<Portal> = doc.data.into_iter().map(Portal::from).collect();
        assert_eq!(portals.len(), 2);
        assert_eq!(portals[0].id, "t-1");
        assert_eq!(portals[1].name, "ops");
    }
}
