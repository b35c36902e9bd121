use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::resource::PathError;

/// Machine-readable error document returned by the platform on failure.
///
/// ```json
/// {"id": "not_found", "code": 102, "message": "...", "url": "...", "data": {...}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Symbolic error id (e.g. `"not_found"`, `"invalid_request_id"`).
    #[serde(default)]
    pub id: Option<String>,
    /// Numeric error code.
    #[serde(default)]
    pub code: Option<i64>,
    /// Human readable message, kept verbatim.
    #[serde(default)]
    pub message: String,
    /// Link to the documentation for this error.
    #[serde(default)]
    pub url: Option<String>,
    /// Field-level detail, when the server sends any.
    #[serde(default)]
    pub data: Option<Value>,
}

impl ErrorDescriptor {
    /// Descriptor carrying only a message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} ({})", self.message, id),
            None => f.write_str(&self.message),
        }
    }
}

/// Kind of an [`ApiError`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingIdentifier,
    MalformedResponse,
    NotFound,
    ValidationFailed,
    RequestRejected,
    ServerError,
    TransportFailure,
}

/// Every failure a resource operation can produce.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// A required id was absent or unusable. No request was sent.
    #[error(transparent)]
    MissingIdentifier(#[from] PathError),

    #[error("Malformed response (status {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    #[error("Resource not found: {0}")]
    NotFound(ErrorDescriptor),

    #[error("Validation failed ({status}): {descriptor}")]
    ValidationFailed {
        status: u16,
        descriptor: ErrorDescriptor,
    },

    #[error("Request rejected ({status}): {descriptor}")]
    RequestRejected {
        status: u16,
        descriptor: ErrorDescriptor,
    },

    #[error("Server error ({status}): {descriptor}")]
    ServerError {
        status: u16,
        descriptor: ErrorDescriptor,
    },

    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingIdentifier(_) => ErrorKind::MissingIdentifier,
            ApiError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            ApiError::RequestRejected { .. } => ErrorKind::RequestRejected,
            ApiError::ServerError { .. } => ErrorKind::ServerError,
            ApiError::TransportFailure(_) => ErrorKind::TransportFailure,
        }
    }

    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::MalformedResponse { status, .. }
            | ApiError::ValidationFailed { status, .. }
            | ApiError::RequestRejected { status, .. }
            | ApiError::ServerError { status, .. } => Some(*status),
            ApiError::MissingIdentifier(_) | ApiError::TransportFailure(_) => None,
        }
    }

    /// The server's error document, for errors that carry one.
    pub fn descriptor(&self) -> Option<&ErrorDescriptor> {
        match self {
            ApiError::NotFound(descriptor)
            | ApiError::ValidationFailed { descriptor, .. }
            | ApiError::RequestRejected { descriptor, .. }
            | ApiError::ServerError { descriptor, .. } => Some(descriptor),
            _ => None,
        }
    }

    /// Machine code from the server's error document.
    pub fn code(&self) -> Option<i64> {
        self.descriptor().and_then(|d| d.code)
    }

    /// Returns true if the error was detected locally, before any request.
    pub fn is_local(&self) -> bool {
        matches!(self, ApiError::MissingIdentifier(_))
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_identifier_from_path_error() {
        let error: ApiError = PathError::MissingIdentifier {
            kind: "message",
            missing: "message",
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::MissingIdentifier);
        assert!(error.is_local());
        assert_eq!(error.status(), None);
        assert_eq!(error.to_string(), "Missing message identifier for message");
    }

    #[test]
    fn test_validation_failed_display_keeps_message() {
        let error = ApiError::ValidationFailed {
            status: 422,
            descriptor: ErrorDescriptor {
                id: Some("missing_property".to_string()),
                code: Some(104),
                message: "The sender property is required".to_string(),
                url: None,
                data: Some(json!({"property": "sender"})),
            },
        };
        assert_eq!(
            error.to_string(),
            "Validation failed (422): The sender property is required (missing_property)"
        );
        assert_eq!(error.code(), Some(104));
        assert_eq!(error.status(), Some(422));
    }

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound(ErrorDescriptor::from_message("gone"));
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.to_string(), "Resource not found: gone");
    }

    #[test]
    fn test_transport_failure_has_no_descriptor() {
        let error = ApiError::TransportFailure("connection refused".to_string());
        assert!(error.descriptor().is_none());
        assert!(!error.is_local());
        assert_eq!(error.to_string(), "Transport failure: connection refused");
    }

    #[test]
    fn test_descriptor_deserializes_partial_document() {
        let descriptor: ErrorDescriptor =
            serde_json::from_value(json!({"message": "Nope"})).unwrap();
        assert_eq!(descriptor, ErrorDescriptor::from_message("Nope"));
    }
}
