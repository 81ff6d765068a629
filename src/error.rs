//! Error types for orgteams

use std::time::Duration;
use thiserror::Error;

use crate::panel::{Busy, FieldError};

/// Result type alias for orgteams operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid team form: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Busy(#[from] Busy),

    #[error("Operation failed: {0}")]
    Other(String),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check the API token in your configuration.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout(_) | ApiError::Network(_) | ApiError::ServerError(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not report the configured limit; callers that know it
            // map the timeout themselves.
            ApiError::Timeout(Duration::ZERO)
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl Error {
    /// True when the error is a backend 404 or an empty resource document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api(ApiError::NotFound(_)))
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `orgteams init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error(
        "Organization not configured. Pass `--org <ORG_ID>` or run `orgteams init` to set a default."
    )]
    MissingOrgId,

    #[error("API host not configured. Pass `--api-host <URL>` or run `orgteams init`.")]
    MissingApiHost,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{FieldError, FormField};

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("API token"));
    }

    #[test]
    fn test_api_error_not_found() {
        let err = ApiError::NotFound("team t-42".to_string());
        assert!(err.to_string().contains("t-42"));
    }

    #[test]
    fn test_api_error_timeout_is_retryable() {
        let err = ApiError::Timeout(Duration::from_secs(30));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_api_error_retryable_classes() {
        assert!(ApiError::Network("reset".to_string()).is_retryable());
        assert!(ApiError::ServerError("boom".to_string()).is_retryable());
        assert!(!ApiError::BadRequest("bad".to_string()).is_retryable());
        assert!(!ApiError::NotFound("gone".to_string()).is_retryable());
        assert!(!ApiError::Forbidden.is_retryable());
    }

    #[test]
    fn test_config_error_missing_org() {
        let err = ConfigError::MissingOrgId;
        assert!(err.to_string().contains("--org"));
    }

    #[test]
    fn test_config_error_missing_api_host() {
        let err = ConfigError::MissingApiHost;
        assert!(err.to_string().contains("--api-host"));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Forbidden.into();

        match err {
            Error::Api(ApiError::Forbidden) => (),
            _ => panic!("Expected Error::Api(ApiError::Forbidden)"),
        }
    }

    #[test]
    fn test_error_is_not_found() {
        let err: Error = ApiError::NotFound("x".to_string()).into();
        assert!(err.is_not_found());

        let err: Error = ApiError::Unauthorized.into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = Error::Validation(vec![FieldError::new(
            FormField::Name,
            "Name is required",
        )]);
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("required"));
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: [yaml: content")
            .unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
