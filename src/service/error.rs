//! Error types for acquisition service calls.

use thiserror::Error;

/// Errors reported by an acquisition collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("network error calling {endpoint}: {source}")]
    Network {
        /// Endpoint that was called.
        endpoint: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("HTTP {status} from {endpoint}: {message}")]
    HttpStatus {
        /// Endpoint that was called.
        endpoint: String,
        /// Response status code.
        status: u16,
        /// Response body, trimmed.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode {
        /// Endpoint that was called.
        endpoint: String,
        /// Decoder message.
        reason: String,
    },

    /// HTTP client construction failed.
    #[error("failed to build service client: {reason}")]
    Client {
        /// Builder message.
        reason: String,
    },

    /// The operation ran and reported failure.
    #[error("{operation} failed: {reason}")]
    Failed {
        /// Operation name.
        operation: String,
        /// Failure description.
        reason: String,
    },
}

impl ServiceError {
    /// Creates a [`ServiceError::Failed`].
    #[must_use]
    pub fn failed(operation: &str, reason: &str) -> Self {
        Self::Failed {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns the HTTP status when the service answered with one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
