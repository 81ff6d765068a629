//! Mutation dispatch: turns a validated form or a confirmed delete into a
//! backend request, then applies the result to the panel.

use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

use super::form::{FieldError, ValidTeamForm, validate};
use super::loader::LoadTicket;
use super::{NoticeLevel, TEAM_GONE, TeamPanel};
use crate::client::api::{SettingsApi, TeamApi};
use crate::client::models::{CreateTeamRequest, Team, UpdateTeamRequest};
use crate::error::{ApiError, Error, Result};

/// Text of the delete confirmation prompt
pub const DELETE_PROMPT: &str =
    "This will permanently delete this team and any permissions associated with it. Are you sure?";

/// A list action was refused because a change is still being saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Another change is still being saved")]
pub struct Busy;

/// Request a mutation will send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Create(CreateTeamRequest),
    Update {
        team_id: String,
        request: UpdateTeamRequest,
    },
    Delete {
        team_id: String,
    },
}

impl MutationKind {
    fn describe(&self) -> String {
        match self {
            MutationKind::Create(request) => format!("create team '{}'", request.name),
            MutationKind::Update { team_id, .. } => format!("update team {}", team_id),
            MutationKind::Delete { team_id } => format!("delete team {}", team_id),
        }
    }
}

/// A mutation that has been accepted by the panel and not yet completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    id: u64,
    kind: MutationKind,
}

impl PendingMutation {
    /// Send the request. Delete yields `None`; create and update yield the
    /// team as the backend now has it.
    pub async fn dispatch<C: TeamApi + ?Sized>(
        &self,
        client: &C,
        org_id: &str,
    ) -> Result<Option<Team>> {
        debug!("dispatch #{}: {}", self.id, self.kind.describe());
        match &self.kind {
            MutationKind::Create(request) => client
                .create_team(org_id, request.clone())
                .await
                .map(Some),
            MutationKind::Update { team_id, request } => client
                .update_team(org_id, team_id, request.clone())
                .await
                .map(Some),
            MutationKind::Delete { team_id } => {
                client.delete_team(org_id, team_id).await.map(|_| None)
            }
        }
    }
}

/// Proof that the user confirmed deleting one team.
///
/// Only [`TeamPanel::request_delete`] can make one, and
/// [`TeamPanel::confirm_delete`] consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct DeleteConfirmation {
    team_id: String,
}

impl DeleteConfirmation {
    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    pub fn prompt(&self) -> &'static str {
        DELETE_PROMPT
    }
}

/// Result of a submit or a confirmed delete
#[derive(Debug)]
pub enum MutationOutcome {
    Created(Team),
    Updated(Team),
    Deleted(String),
    /// Validation failed; nothing was sent
    Invalid(Vec<FieldError>),
    /// The team being edited no longer exists
    Gone(String),
    Failed(Error),
    Busy,
    /// Submit without a visible modal
    NotOpen,
    /// The panel was reset while the request was in flight
    Superseded,
}

impl MutationOutcome {
    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            MutationOutcome::Created(_) | MutationOutcome::Updated(_) | MutationOutcome::Deleted(_)
        )
    }
}

impl<C: SettingsApi + ?Sized> TeamPanel<C> {
    fn start_mutation(&mut self, kind: MutationKind) -> PendingMutation {
        self.next_mutation += 1;
        self.pending = Some(self.next_mutation);
        PendingMutation {
            id: self.next_mutation,
            kind,
        }
    }

    /// Validate the open form and mark its request as pending.
    ///
    /// On validation failure the errors are attached to the form, the modal
    /// stays open, and nothing is pending.
    pub fn begin_submit(&mut self) -> std::result::Result<PendingMutation, MutationOutcome> {
        if self.pending.is_some() {
            return Err(MutationOutcome::Busy);
        }
        if !self.modal.is_visible() {
            return Err(MutationOutcome::NotOpen);
        }
        let Some(mode) = self.modal.mode() else {
            return Err(MutationOutcome::NotOpen);
        };

        let kind = match validate(self.modal.form(), mode) {
            Ok(ValidTeamForm::Create(request)) => MutationKind::Create(request),
            Ok(ValidTeamForm::Update(request)) => {
                let Some(team_id) = self.modal.target_id() else {
                    return Err(MutationOutcome::NotOpen);
                };
                MutationKind::Update {
                    team_id: team_id.to_string(),
                    request,
                }
            }
            Err(errors) => {
                debug!("submit rejected: {} field error(s)", errors.len());
                if let Some(form) = self.modal.form_mut() {
                    form.set_errors(errors.clone());
                }
                return Err(MutationOutcome::Invalid(errors));
            }
        };

        Ok(self.start_mutation(kind))
    }

    /// Apply the backend's answer to a pending mutation.
    ///
    /// Returns the outcome plus the ticket of the reload it started, if any.
    pub fn complete_mutation(
        &mut self,
        pending: PendingMutation,
        result: Result<Option<Team>>,
    ) -> (MutationOutcome, Option<LoadTicket>) {
        if self.pending != Some(pending.id) {
            debug!("dropping result of stale mutation #{}", pending.id);
            return (MutationOutcome::Superseded, None);
        }
        self.pending = None;

        let result = match (&pending.kind, result) {
            (MutationKind::Delete { .. }, Ok(_)) => Ok(None),
            (_, Ok(Some(team))) => Ok(Some(team)),
            (_, Ok(None)) => Err(Error::from(ApiError::InvalidResponse(
                "backend returned no team".to_string(),
            ))),
            (_, Err(e)) => Err(e),
        };

        match (pending.kind, result) {
            (MutationKind::Create(_), Ok(Some(team))) => {
                self.modal.close();
                self.notify(NoticeLevel::Success, format!("Team {} created", team.name));
                (MutationOutcome::Created(team), Some(self.begin_load()))
            }
            (MutationKind::Update { .. }, Ok(Some(team))) => {
                self.modal.close();
                self.notify(NoticeLevel::Success, "Team permissions saved");
                (MutationOutcome::Updated(team), Some(self.begin_load()))
            }
            (MutationKind::Delete { team_id }, Ok(_)) => {
                self.notify(NoticeLevel::Success, "Team deleted");
                (MutationOutcome::Deleted(team_id), Some(self.begin_load()))
            }
            (MutationKind::Update { team_id, .. }, Err(e)) if e.is_not_found() => {
                warn!("team {} vanished while being edited", team_id);
                self.modal.close();
                self.notify(NoticeLevel::Error, TEAM_GONE);
                (MutationOutcome::Gone(team_id), Some(self.begin_load()))
            }
            (kind, Err(e)) => {
                warn!("{} failed: {}", kind.describe(), e);
                self.notify(NoticeLevel::Error, e.to_string());
                (MutationOutcome::Failed(e), None)
            }
            (kind, Ok(_)) => {
                // Create and update results without a team were mapped to errors above.
                warn!("{} returned an unexpected result", kind.describe());
                (MutationOutcome::Superseded, None)
            }
        }
    }

    /// Validate, send and apply the open form, then reload on success.
    pub async fn submit(&mut self) -> MutationOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };

        let client = Arc::clone(&self.client);
        let org_id = self.context.org_id.clone();
        let result = pending.dispatch(client.as_ref(), &org_id).await;

        let (outcome, reload) = self.complete_mutation(pending, result);
        if let Some(ticket) = reload {
            self.run_load(ticket).await;
        }
        outcome
    }

    /// First step of deleting a team: ask for confirmation.
    ///
    /// Nothing is sent until the returned token is passed to
    /// [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&self, team_id: &str) -> std::result::Result<DeleteConfirmation, Busy> {
        if self.pending.is_some() {
            return Err(Busy);
        }
        Ok(DeleteConfirmation {
            team_id: team_id.to_string(),
        })
    }

    /// Mark a confirmed delete as pending.
    pub fn begin_delete(
        &mut self,
        confirmation: DeleteConfirmation,
    ) -> std::result::Result<PendingMutation, Busy> {
        if self.pending.is_some() {
            return Err(Busy);
        }
        Ok(self.start_mutation(MutationKind::Delete {
            team_id: confirmation.team_id,
        }))
    }

    /// Delete the confirmed team, then reload on success.
    pub async fn confirm_delete(&mut self, confirmation: DeleteConfirmation) -> MutationOutcome {
        let pending = match self.begin_delete(confirmation) {
            Ok(pending) => pending,
            Err(Busy) => return MutationOutcome::Busy,
        };

        let client = Arc::clone(&self.client);
        let org_id = self.context.org_id.clone();
        let result = pending.dispatch(client.as_ref(), &org_id).await;

        let (outcome, reload) = self.complete_mutation(pending, result);
        if let Some(ticket) = reload {
            self.run_load(ticket).await;
        }
        outcome
    }
}
