//! Team API trait for CRUD operations
//!
//! This trait covers all team management operations:
//! - Get team details and permission flags
//! - Create new teams
//! - Update team permission flags
//! - Delete teams

use async_trait::async_trait;

use crate::client::models::{CreateTeamRequest, Team, UpdateTeamRequest};
use crate::error::Result;

/// Team management operations
#[async_trait]
pub trait TeamApi: Send + Sync {
    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Get a team with its current permission flags.
    ///
    /// Fails with `ApiError::NotFound` when the team does not exist, including
    /// when the backend answers with an empty `data` member.
    async fn get_team(&self, org_id: &str, team_id: &str) -> Result<Team>;

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Create a new team in the organization with a name and initial flags.
    async fn create_team(&self, org_id: &str, request: CreateTeamRequest) -> Result<Team>;

    /// Replace the permission flags of an existing team.
    ///
    /// The team name is immutable and never sent.
    async fn update_team(
        &self,
        org_id: &str,
        team_id: &str,
        request: UpdateTeamRequest,
    ) -> Result<Team>;

    /// Delete a team from the organization.
    ///
    /// Deletion is permanent; the backend removes every permission attached
    /// to the team.
    async fn delete_team(&self, org_id: &str, team_id: &str) -> Result<()>;
}
