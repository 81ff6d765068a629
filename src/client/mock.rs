//! Mock settings API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{PortalApi, TeamApi};
use super::models::{CreateTeamRequest, Portal, Team, UpdateTeamRequest};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
/// Portals and teams are kept in step: creating a team adds a portal with
/// the same id, deleting one removes both.
///
/// # Example
/// ```ignore
/// let mock = MockSettingsClient::new()
///     .with_teams(vec![team("t-1", "dev")])
///     .await;
///
/// let portals = mock.list_portals("org-1").await?;
/// assert_eq!(portals.len(), 1);
/// ```
pub struct MockSettingsClient {
    /// Portals to return from list_portals
    portals: Arc<Mutex<Vec<Portal>>>,
    /// Teams for get_team and CRUD operations
    teams: Arc<Mutex<Vec<Team>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    /// Counter for generated team ids
    next_id: Arc<Mutex<usize>>,
}

impl Default for MockSettingsClient {
    fn default() -> Self {
        Self {
            portals: Arc::new(Mutex::new(Vec::new())),
            teams: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_portals: usize,
    pub get_team: usize,
    pub create_team: usize,
    pub update_team: usize,
    pub delete_team: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_portals + self.get_team + self.create_team + self.update_team + self.delete_team
    }

    /// Number of mutating calls (create, update, delete).
    pub fn mutations(&self) -> usize {
        self.create_team + self.update_team + self.delete_team
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_portals", "update_team")
    pub method: String,
    /// Organization ID
    pub org_id: String,
    /// Team ID for single-team operations
    pub team_id: Option<String>,
    /// Attributes that would be sent as the request body
    pub body: Option<serde_json::Value>,
}

impl MockSettingsClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure portals only, without matching teams.
    pub async fn with_portals(self, portals: Vec<Portal>) -> Self {
        *self.portals.lock().await = portals;
        self
    }

    /// Configure teams and a matching portal for each.
    pub async fn with_teams(self, teams: Vec<Team>) -> Self {
        *self.portals.lock().await = teams
            .iter()
            .map(|t| Portal {
                id: t.id.clone(),
                name: t.name.clone(),
            })
            .collect();
        *self.teams.lock().await = teams;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        self.fail_next(error).await;
        self
    }

    /// Arm a one-shot error on an existing client.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Remove a team behind the panel's back (concurrent deletion).
    pub async fn remove_team(&self, team_id: &str) {
        self.teams.lock().await.retain(|t| t.id != team_id);
        self.portals.lock().await.retain(|p| p.id != team_id);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Captured requests for a single API method.
    pub async fn captured(&self, method: &str) -> Vec<CapturedRequest> {
        self.captured_requests()
            .await
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    /// Record a captured request for test assertions.
    async fn capture_request(
        &self,
        method: &str,
        org_id: &str,
        team_id: Option<&str>,
        body: Option<serde_json::Value>,
    ) {
        let mut requests = self.captured_requests.lock().await;
        requests.push(CapturedRequest {
            method: method.to_string(),
            org_id: org_id.to_string(),
            team_id: team_id.map(|s| s.to_string()),
            body,
        });
    }
}

// ============================================================================
// PortalApi Implementation
// ============================================================================

#[async_trait]
impl PortalApi for MockSettingsClient {
    async fn list_portals(&self, org_id: &str) -> Result<Vec<Portal>> {
        self.capture_request("list_portals", org_id, None, None).await;

        let mut counts = self.call_count.lock().await;
        counts.list_portals += 1;
        drop(counts);

        self.check_error().await?;

        Ok(self.portals.lock().await.clone())
    }
}

// ============================================================================
// TeamApi Implementation
// ============================================================================

#[async_trait]
impl TeamApi for MockSettingsClient {
    async fn get_team(&self, org_id: &str, team_id: &str) -> Result<Team> {
        self.capture_request("get_team", org_id, Some(team_id), None)
            .await;

        let mut counts = self.call_count.lock().await;
        counts.get_team += 1;
        drop(counts);

        self.check_error().await?;

        self.teams
            .lock()
            .await
            .iter()
            .find(|t| t.id == team_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("team {} not found", team_id)).into())
    }

    async fn create_team(&self, org_id: &str, request: CreateTeamRequest) -> Result<Team> {
        self.capture_request(
            "create_team",
            org_id,
            None,
            serde_json::to_value(&request).ok(),
        )
        .await;

        let mut counts = self.call_count.lock().await;
        counts.create_team += 1;
        drop(counts);

        self.check_error().await?;

        let id = {
            let mut next = self.next_id.lock().await;
            let id = format!("mock-team-{}", *next);
            *next += 1;
            id
        };

        let team = Team {
            id: id.clone(),
            name: request.name,
            flags: request.flags,
        };

        self.teams.lock().await.push(team.clone());
        self.portals.lock().await.push(Portal {
            id,
            name: team.name.clone(),
        });

        Ok(team)
    }

    async fn update_team(
        &self,
        org_id: &str,
        team_id: &str,
        request: UpdateTeamRequest,
    ) -> Result<Team> {
        self.capture_request(
            "update_team",
            org_id,
            Some(team_id),
            serde_json::to_value(&request).ok(),
        )
        .await;

        let mut counts = self.call_count.lock().await;
        counts.update_team += 1;
        drop(counts);

        self.check_error().await?;

        let mut teams = self.teams.lock().await;
        let team = teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or_else(|| ApiError::NotFound(format!("team {} not found", team_id)))?;

        team.flags = request.flags;
        Ok(team.clone())
    }

    async fn delete_team(&self, org_id: &str, team_id: &str) -> Result<()> {
        self.capture_request("delete_team", org_id, Some(team_id), None)
            .await;

        let mut counts = self.call_count.lock().await;
        counts.delete_team += 1;
        drop(counts);

        self.check_error().await?;

        let mut teams = self.teams.lock().await;
        let before = teams.len();
        teams.retain(|t| t.id != team_id);
        if teams.len() == before {
            return Err(ApiError::NotFound(format!("team {} not found", team_id)).into());
        }
        drop(teams);

        self.portals.lock().await.retain(|p| p.id != team_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Permission, PermissionFlags};

    fn team(id: &str, name: &str) -> Team {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            flags: PermissionFlags::default(),
        }
    }

    #[tokio::test]
    async fn test_mock_with_teams_populates_portals() {
        let mock = MockSettingsClient::new()
            .with_teams(vec![team("t-1", "dev"), team("t-2", "ops")])
            .await;

        let portals = mock.list_portals("org-1").await.unwrap();
        assert_eq!(portals.len(), 2);
        assert_eq!(portals[1].id, "t-2");

        let counts = mock.call_counts().await;
        assert_eq!(counts.list_portals, 1);
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockSettingsClient::new()
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.list_portals("org-1").await.is_err());
        assert!(mock.list_portals("org-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_create_adds_portal() {
        let mock = MockSettingsClient::new();

        let request = CreateTeamRequest {
            name: "New Team".to_string(),
            flags: PermissionFlags::default(),
        };
        let created = mock.create_team("org-1", request).await.unwrap();
        assert!(created.id.starts_with("mock-team-"));

        let portals = mock.list_portals("org-1").await.unwrap();
        assert_eq!(portals.len(), 1);
        assert_eq!(portals[0].name, "New Team");

        let captured = mock.captured("create_team").await;
        assert_eq!(captured[0].body.as_ref().unwrap()["name"], "New Team");
    }

    #[tokio::test]
    async fn test_mock_update_replaces_flags() {
        let mock = MockSettingsClient::new()
            .with_teams(vec![team("t-1", "dev")])
            .await;

        let request = UpdateTeamRequest {
            flags: PermissionFlags::default().with(Permission::Provider, true),
        };
        let updated = mock.update_team("org-1", "t-1", request).await.unwrap();
        assert!(updated.flags.manage_provider);

        let fetched = mock.get_team("org-1", "t-1").await.unwrap();
        assert!(fetched.flags.manage_provider);
    }

    #[tokio::test]
    async fn test_mock_delete_removes_team_and_portal() {
        let mock = MockSettingsClient::new()
            .with_teams(vec![team("t-7", "old")])
            .await;

        mock.delete_team("org-1", "t-7").await.unwrap();

        assert!(mock.get_team("org-1", "t-7").await.is_err());
        assert!(mock.list_portals("org-1").await.unwrap().is_empty());

        let counts = mock.call_counts().await;
        assert_eq!(counts.delete_team, 1);
        assert_eq!(counts.mutations(), 1);
    }

    #[tokio::test]
    async fn test_mock_delete_not_found() {
        let mock = MockSettingsClient::new();

        let result = mock.delete_team("org-1", "nonexistent").await;
        assert!(result.is_err());
    }
}
