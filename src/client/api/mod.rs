//! API trait definitions split by responsibility
//!
//! This module organizes the settings API surface into focused sub-traits:
//! - [`PortalApi`] - Portal collection reads
//! - [`TeamApi`] - Team reads and mutations
//!
//! The [`SettingsApi`] super-trait combines both and is what the panel is
//! generic over.

mod portal;
mod team;

pub use portal::PortalApi;
pub use team::TeamApi;

/// Everything the team settings panel needs from the backend.
pub trait SettingsApi: PortalApi + TeamApi {}

impl<T: PortalApi + TeamApi> SettingsApi for T {}
