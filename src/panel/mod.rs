//! Headless team settings panel
//!
//! `TeamPanel` owns the portal list, the create/edit modal and the mutation
//! in flight. Every network step is split in two: a synchronous `begin_*`
//! that updates state and hands back a ticket, and a `complete_*` that applies
//! the answer. The async methods (`mount`, `reload`, `edit`, `submit`,
//! `confirm_delete`) chain both halves around a call to the client.
//!
//! Failures never escape as panics or errors: they are recorded as
//! [`Notice`]s and returned as outcome values.

mod dispatch;
mod form;
mod loader;
mod modal;

use std::sync::Arc;

use log::{debug, warn};

use crate::client::api::SettingsApi;
use crate::client::models::{Permission, Portal, Team};
use crate::error::{Error, Result};

pub use dispatch::{Busy, MutationOutcome};
pub use form::{FieldError, FormField, FormMode, TeamForm, ValidTeamForm, validate};
pub use loader::{ListView, LoadOutcome, LoadTicket, PortalList};
pub use modal::{EditTicket, ModalSession, ModalState, NAME_HINT, SAVE_LABEL};

/// Message shown when the team being edited has been deleted elsewhere
pub const TEAM_GONE: &str = "Team no longer exists";

/// Organization the panel is mounted for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelContext {
    pub org_id: String,
    pub org_name: Option<String>,
}

impl PanelContext {
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            org_name: None,
        }
    }

    pub fn with_name(mut self, org_name: Option<String>) -> Self {
        self.org_name = org_name;
        self
    }

    /// "{org} / Settings / Teams", using the id when no name is known
    pub fn breadcrumb(&self) -> String {
        let org = self.org_name.as_deref().unwrap_or(&self.org_id);
        format!("{} / Settings / Teams", org)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible message raised by the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Result of opening a team for editing
#[derive(Debug)]
pub enum EditOutcome {
    /// Flags arrived and the form is showing
    Opened,
    /// The team does not exist anymore
    Gone,
    Failed(Error),
    /// The modal moved on before the fetch answered
    Superseded,
    Busy,
}

impl EditOutcome {
    #[cfg(test)]
    pub fn is_opened(&self) -> bool {
        matches!(self, EditOutcome::Opened)
    }
}

pub struct TeamPanel<C: SettingsApi + ?Sized> {
    client: Arc<C>,
    context: PanelContext,
    list: PortalList,
    modal: ModalSession,
    pending: Option<u64>,
    next_mutation: u64,
    notices: Vec<Notice>,
}

impl<C: SettingsApi + ?Sized> TeamPanel<C> {
    pub fn new(client: Arc<C>, context: PanelContext) -> Self {
        Self {
            client,
            context,
            list: PortalList::default(),
            modal: ModalSession::default(),
            pending: None,
            next_mutation: 0,
            notices: Vec::new(),
        }
    }

    pub fn context(&self) -> &PanelContext {
        &self.context
    }

    pub fn list(&self) -> &PortalList {
        &self.list
    }

    pub fn modal(&self) -> &ModalSession {
        &self.modal
    }

    pub fn form(&self) -> &TeamForm {
        self.modal.form()
    }

    /// Whether a mutation is waiting for the backend
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    #[cfg(test)]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain the notices raised so far.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Initial load for the current organization.
    pub async fn mount(&mut self) -> LoadOutcome {
        debug!("mounting panel for org {}", self.context.org_id);
        self.reload().await
    }

    /// Drop all state as if the panel had been unmounted.
    pub fn reset(&mut self) {
        debug!("resetting panel for org {}", self.context.org_id);
        self.list.reset();
        self.modal.close();
        self.pending = None;
        self.notices.clear();
    }

    /// Move the panel to another organization.
    ///
    /// Reloads only when the organization id actually changes; a new display
    /// name alone is just recorded.
    pub async fn switch_org(&mut self, context: PanelContext) -> Option<LoadOutcome> {
        if context.org_id == self.context.org_id {
            self.context.org_name = context.org_name;
            return None;
        }

        debug!(
            "switching org {} -> {}",
            self.context.org_id, context.org_id
        );
        self.reset();
        self.context = context;
        Some(self.reload().await)
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Mark a list load as started.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.list.begin()
    }

    /// Apply a list load result, raising a notice when it failed.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<Portal>>) -> LoadOutcome {
        let outcome = self.list.finish(ticket, result);
        if let LoadOutcome::Failed(e) = &outcome {
            let message = format!("Failed to load teams: {}", e);
            self.notify(NoticeLevel::Error, message);
        }
        outcome
    }

    /// Fetch the portal list for the current organization.
    pub async fn reload(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        self.run_load(ticket).await
    }

    pub(crate) async fn run_load(&mut self, ticket: LoadTicket) -> LoadOutcome {
        let client = Arc::clone(&self.client);
        let org_id = self.context.org_id.clone();
        let result = client.list_portals(&org_id).await;
        self.complete_load(ticket, result)
    }

    // ========================================================================
    // Modal
    // ========================================================================

    /// Open an empty create form.
    pub fn open_create(&mut self) -> std::result::Result<(), Busy> {
        if self.is_busy() {
            return Err(Busy);
        }
        self.modal.open_create();
        Ok(())
    }

    /// Close the modal without saving.
    pub fn cancel(&mut self) {
        self.modal.close();
    }

    /// Set the name field. Ignored unless a create form is showing.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        if self.modal.state() != &ModalState::CreateOpen {
            return false;
        }
        match self.modal.form_mut() {
            Some(form) => {
                form.set_name(name);
                true
            }
            None => false,
        }
    }

    /// Flip one permission switch. Ignored unless the modal is showing.
    pub fn set_flag(&mut self, permission: Permission, value: bool) -> bool {
        match self.modal.form_mut() {
            Some(form) => {
                form.set_flag(permission, value);
                true
            }
            None => false,
        }
    }

    /// Start editing a team. The modal stays hidden until
    /// [`complete_edit`](Self::complete_edit) receives its flags.
    pub fn begin_edit(&mut self, team_id: &str) -> std::result::Result<EditTicket, Busy> {
        if self.is_busy() {
            return Err(Busy);
        }
        Ok(self.modal.begin_edit(team_id))
    }

    /// Apply the fetched team to a pending edit.
    ///
    /// Returns the outcome plus the ticket of the reload it started when the
    /// team turned out to be gone.
    pub fn complete_edit(
        &mut self,
        ticket: EditTicket,
        result: Result<Team>,
    ) -> (EditOutcome, Option<LoadTicket>) {
        if !self.modal.is_awaiting(&ticket) {
            debug!("dropping stale edit fetch for {}", ticket.team_id());
            return (EditOutcome::Superseded, None);
        }

        match result {
            Ok(team) => {
                self.modal.finish_edit(&ticket, &team);
                (EditOutcome::Opened, None)
            }
            Err(e) if e.is_not_found() => {
                warn!("team {} not found when opening edit", ticket.team_id());
                self.modal.close();
                self.notify(NoticeLevel::Error, TEAM_GONE);
                (EditOutcome::Gone, Some(self.begin_load()))
            }
            Err(e) => {
                warn!("failed to fetch team {}: {}", ticket.team_id(), e);
                self.modal.close();
                self.notify(NoticeLevel::Error, format!("Failed to load team: {}", e));
                (EditOutcome::Failed(e), None)
            }
        }
    }

    /// Fetch a team and open the edit form with its flags.
    pub async fn edit(&mut self, team_id: &str) -> EditOutcome {
        let ticket = match self.begin_edit(team_id) {
            Ok(ticket) => ticket,
            Err(Busy) => return EditOutcome::Busy,
        };

        let client = Arc::clone(&self.client);
        let org_id = self.context.org_id.clone();
        let result = client.get_team(&org_id, ticket.team_id()).await;

        let (outcome, reload) = self.complete_edit(ticket, result);
        if let Some(load) = reload {
            self.run_load(load).await;
        }
        outcome
    }
}
