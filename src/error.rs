//! Error types for the Chronos client

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::target::ConnectionTarget;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// Main error type for the client
///
/// Cloneable so a resolved [`Deferred`](crate::Deferred) can hand out the
/// same outcome on every retrieval.
#[derive(Error, Debug, Clone)]
pub enum SdkError {
    /// Invalid connection parameters or environment, detected before any network activity
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The remote call failed; only surfaced when the result is retrieved
    #[error("Remote call {operation} to <{target}> failed: {cause}")]
    RemoteCall {
        target: ConnectionTarget,
        operation: &'static str,
        #[source]
        cause: Arc<TransportError>,
    },

    /// Retrieval exceeded its bound. The remote work may still complete.
    #[error("Operation {operation} timed out after {after:?} (remote outcome unknown)")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl SdkError {
    /// Returns true if this is a retrieval timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, SdkError::Timeout { .. })
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SdkError::Configuration(msg.into())
    }
}

impl From<url::ParseError> for SdkError {
    fn from(e: url::ParseError) -> Self {
        SdkError::Configuration(format!("URL parse error: {}", e))
    }
}

/// Transport-level cause of a failed remote call
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A read endpoint answered with a non-success status
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The background task panicked or was cancelled before resolving
    #[error("Background call aborted: {0}")]
    Aborted(String),

    /// Failures from non-Chronos async APIs driven through the harness
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
