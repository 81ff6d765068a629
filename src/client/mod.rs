//! Settings API client
//!
//! Trait definitions live in [`api`], wire models in [`models`], and the
//! HTTP implementation in [`rest`].

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod rest;

pub use api::{PortalApi, SettingsApi, TeamApi};
#[cfg(test)]
pub use mock::MockSettingsClient;
pub use rest::RestClient;
