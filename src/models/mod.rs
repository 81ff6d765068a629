//! Display models for CLI output
//!
//! Converts API types into CLI-friendly display formats.

pub mod display;

pub use display::{PortalDisplay, TeamDisplay, permission_changes};
