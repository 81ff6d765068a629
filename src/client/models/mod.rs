//! Backend data models
//!
//! JSON:API envelope types plus the portal and team resources.

mod envelope;
mod portal;
mod team;

pub use envelope::{Document, JSON_API_MEDIA_TYPE, NewResource, Resource};
pub use portal::{Portal, PortalAttributes};
pub use team::{
    CreateTeamRequest, Permission, PermissionFlags, TEAM_TYPE, Team, TeamAttributes,
    UpdateTeamRequest,
};
