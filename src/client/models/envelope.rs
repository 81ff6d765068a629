//! JSON:API document envelope
//!
//! The backend speaks JSON:API: every payload is wrapped in a top-level
//! `data` member holding one resource object or an array of them.

use serde::{Deserialize, Serialize};

/// Media type used for request and response bodies
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Top-level document `{ "data": ... }`
///
/// A missing or `null` `data` member deserializes to `T::default()`, which is
/// why response documents are read as `Document<Option<_>>` or
/// `Document<Vec<_>>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(default)]
    pub data: T,
}

impl<T> Document<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Resource object with an identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource<A> {
    /// Resource type (e.g. `team`)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Backend-assigned identifier
    #[serde(default)]
    pub id: String,

    pub attributes: A,
}

/// Resource object that has not been assigned an identifier yet (POST bodies)
#[derive(Debug, Clone, Serialize)]
pub struct NewResource<A> {
    #[serde(rename = "type")]
    pub kind: &'static str,

    pub attributes: A,
}
