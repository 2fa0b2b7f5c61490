//! Error types for FAIRDOM-SEEK API operations.

use thiserror::Error;

use crate::models::{ErrorDocument, ErrorObject};

/// Errors that can occur during FAIRDOM-SEEK API operations.
#[derive(Debug, Error)]
pub enum SeekError {
    /// Configuration is missing or incomplete.
    #[error("FAIRDOM-SEEK configuration required: {0}")]
    ConfigMissing(String),

    /// A configuration value is present but malformed.
    #[error("Invalid FAIRDOM-SEEK configuration: {0}")]
    InvalidConfig(String),

    /// An operation was attempted before a successful login.
    #[error("You are not logged in. Please log in before performing this action.")]
    NotLoggedIn,

    /// The resource type is not accepted by the requested operation.
    #[error("Object type \"{object_type}\" not recognized. Valid types are: {}", .valid.join(", "))]
    UnsupportedType {
        object_type: String,
        valid: Vec<String>,
    },

    /// The API answered with a non-success status.
    #[error("{message}")]
    ApiError {
        message: String,
        status_code: u16,
        errors: Vec<ErrorObject>,
    },

    /// A command-line argument could not be used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Username/password could not be obtained.
    #[error("Failed to obtain credentials: {0}")]
    Credentials(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl SeekError {
    /// Build an [`SeekError::ApiError`] from a failed response body.
    ///
    /// The message joins the `title` and `detail` of every entry in the
    /// body's `errors` array. Bodies that are not JSON:API error documents,
    /// or carry no usable entries, produce a generic message naming the
    /// status.
    pub fn from_error_body(status: reqwest::StatusCode, body: &str) -> Self {
        let errors = serde_json::from_str::<ErrorDocument>(body)
            .map(|doc| doc.errors)
            .unwrap_or_default();

        let message = errors
            .iter()
            .map(ErrorObject::summary)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(". ");

        let message = if message.is_empty() {
            format!("FAIRDOM-SEEK request failed with HTTP {status}")
        } else {
            message
        };

        SeekError::ApiError {
            message,
            status_code: status.as_u16(),
            errors,
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SeekError::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether this is an API error reporting that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for FAIRDOM-SEEK operations.
pub type Result<T> = core::result::Result<T, SeekError>;
