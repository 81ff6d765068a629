//! Create/edit modal state machine
//!
//! ```text
//!            new                       submit ok / cancel
//!  Closed ────────────▶ CreateOpen ─────────────────────────▶ Closed
//!    │
//!    │ edit(id)        flags fetched          submit ok / cancel
//!    └───────▶ EditLoading ─────────▶ EditOpen ─────────────▶ Closed
//!                  │
//!                  └── fetch failed / team gone ────────────▶ Closed
//! ```
//!
//! The modal is only visible in `CreateOpen` and `EditOpen`: an edit form is
//! never shown before the team's flags have arrived.

use log::debug;

use super::form::{FormMode, TeamForm};
use crate::client::models::Team;

/// Title of the modal in create mode
pub const CREATE_TITLE: &str = "Create new team";

/// Label of the confirm button
pub const SAVE_LABEL: &str = "Save team";

/// Hint shown next to the name field
pub const NAME_HINT: &str = "Must be a valid AD Group name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    CreateOpen,
    EditLoading {
        target_id: String,
        seq: u64,
    },
    EditOpen {
        target_id: String,
        display_name: String,
    },
}

/// Handle for an edit whose flags are being fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTicket {
    pub(crate) team_id: String,
    pub(crate) seq: u64,
}

impl EditTicket {
    pub fn team_id(&self) -> &str {
        &self.team_id
    }
}

/// Modal session: visibility, mode, target and the form it owns
#[derive(Debug, Clone)]
pub struct ModalSession {
    state: ModalState,
    form: TeamForm,
    seq: u64,
}

impl Default for ModalSession {
    fn default() -> Self {
        Self {
            state: ModalState::Closed,
            form: TeamForm::default(),
            seq: 0,
        }
    }
}

impl ModalSession {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn form(&self) -> &TeamForm {
        &self.form
    }

    /// Form for editing, available only while the modal is visible
    pub fn form_mut(&mut self) -> Option<&mut TeamForm> {
        if self.is_visible() {
            Some(&mut self.form)
        } else {
            None
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(
            self.state,
            ModalState::CreateOpen | ModalState::EditOpen { .. }
        )
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.state == ModalState::Closed
    }

    /// Create or edit, if the modal is past `Closed`
    pub fn mode(&self) -> Option<FormMode> {
        match self.state {
            ModalState::Closed => None,
            ModalState::CreateOpen => Some(FormMode::Create),
            ModalState::EditLoading { .. } | ModalState::EditOpen { .. } => Some(FormMode::Edit),
        }
    }

    /// Team being edited
    pub fn target_id(&self) -> Option<&str> {
        match &self.state {
            ModalState::EditLoading { target_id, .. } | ModalState::EditOpen { target_id, .. } => {
                Some(target_id)
            }
            _ => None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match &self.state {
            ModalState::EditOpen { display_name, .. } => Some(display_name),
            _ => None,
        }
    }

    /// Modal title, when visible
    pub fn title(&self) -> Option<String> {
        match &self.state {
            ModalState::CreateOpen => Some(CREATE_TITLE.to_string()),
            ModalState::EditOpen { display_name, .. } => Some(format!("Edit team {}", display_name)),
            _ => None,
        }
    }

    pub(crate) fn open_create(&mut self) {
        debug!("modal: {:?} -> CreateOpen", self.state);
        self.form.clear();
        self.state = ModalState::CreateOpen;
    }

    pub(crate) fn begin_edit(&mut self, team_id: &str) -> EditTicket {
        self.seq += 1;
        debug!("modal: {:?} -> EditLoading({})", self.state, team_id);
        self.form.clear();
        self.state = ModalState::EditLoading {
            target_id: team_id.to_string(),
            seq: self.seq,
        };
        EditTicket {
            team_id: team_id.to_string(),
            seq: self.seq,
        }
    }

    /// Whether `ticket` is the edit the modal is currently waiting on
    pub(crate) fn is_awaiting(&self, ticket: &EditTicket) -> bool {
        matches!(
            &self.state,
            ModalState::EditLoading { target_id, seq }
                if *seq == ticket.seq && *target_id == ticket.team_id
        )
    }

    /// Populate the form from the fetched team and show it.
    ///
    /// Returns false, leaving the state alone, when the ticket is stale.
    pub(crate) fn finish_edit(&mut self, ticket: &EditTicket, team: &Team) -> bool {
        if !self.is_awaiting(ticket) {
            debug!("modal: ignoring stale edit fetch for {}", ticket.team_id);
            return false;
        }

        self.form = TeamForm::with_flags(team.flags);
        let display_name = if team.name.is_empty() {
            ticket.team_id.clone()
        } else {
            team.name.clone()
        };
        debug!("modal: EditLoading -> EditOpen({})", ticket.team_id);
        self.state = ModalState::EditOpen {
            target_id: ticket.team_id.clone(),
            display_name,
        };
        true
    }

    pub(crate) fn close(&mut self) {
        if self.state != ModalState::Closed {
            debug!("modal: {:?} -> Closed", self.state);
        }
        self.form.clear();
        self.state = ModalState::Closed;
    }
}
