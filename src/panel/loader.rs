//! Portal list loading state

use log::{debug, warn};

use crate::client::models::Portal;
use crate::error::{Error, Result};

/// Handle for one in-flight list load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// What happened when a load completed
#[derive(Debug)]
pub enum LoadOutcome {
    /// The list was replaced with this many portals
    Loaded(usize),
    /// The load failed; the previous list is kept
    Failed(Error),
    /// A newer load was started; this result was dropped
    Superseded,
}

/// What the list area should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    /// A load is in flight; show the placeholder
    Loading,
    /// Nothing has loaded successfully yet
    Unavailable,
    /// Loaded, and the organization has no portals
    Empty,
    Items(&'a [Portal]),
}

/// The displayed portal collection and its loading flag
#[derive(Debug, Default)]
pub struct PortalList {
    portals: Vec<Portal>,
    loading: bool,
    loaded: bool,
    generation: u64,
}

impl PortalList {
    /// Mark a load as started. Any earlier in-flight load is superseded.
    pub(crate) fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        debug!("portal list: load #{} started", self.generation);
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a load result. The loading flag is cleared on success and
    /// failure alike, but only by the latest load.
    pub(crate) fn finish(&mut self, ticket: LoadTicket, result: Result<Vec<Portal>>) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!(
                "portal list: dropping load #{} (latest is #{})",
                ticket.generation, self.generation
            );
            return LoadOutcome::Superseded;
        }

        self.loading = false;
        match result {
            Ok(portals) => {
                let count = portals.len();
                debug!("portal list: load #{} returned {} portals", ticket.generation, count);
                self.portals = portals;
                self.loaded = true;
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                warn!("portal list: load #{} failed: {}", ticket.generation, e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Forget everything, including any in-flight load.
    pub(crate) fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last successfully loaded portals
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    #[cfg(test)]
    pub fn contains(&self, id: &str) -> bool {
        self.portals.iter().any(|p| p.id == id)
    }

    pub fn view(&self) -> ListView<'_> {
        if self.loading {
            ListView::Loading
        } else if !self.loaded {
            ListView::Unavailable
        } else if self.portals.is_empty() {
            ListView::Empty
        } else {
            ListView::Items(&self.portals)
        }
    }
}
