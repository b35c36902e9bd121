//! Client error types.

use thiserror::Error;

pub use layer_core::api::{ApiError, ErrorDescriptor, ErrorKind};
pub use layer_core::resource::PathError;

use crate::transport::TransportError;

/// Result type alias for resource operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised while building a [`Client`](crate::Client) from configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing app id (set LAYER_APP_ID)")]
    MissingAppId,

    #[error("Missing platform API token (set LAYER_PLATFORM_TOKEN)")]
    MissingToken,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        ApiError::TransportFailure(error.to_string())
    }
}
