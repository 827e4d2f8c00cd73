//! Error types for the site auditor

use thiserror::Error;

/// Errors that can occur while running an audit
///
/// Transport failures against the main page do NOT surface here:
/// an unreachable site still produces a report (score 0). These
/// errors cover invalid input and client construction only, plus
/// the classified transport errors used internally for reporting.
#[derive(Debug, Error)]
pub enum AuditError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// URL failed to parse after normalization
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl AuditError {
    /// Classify a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuditError::Timeout
        } else if err.is_connect() {
            AuditError::ConnectError(err)
        } else {
            AuditError::RequestError(err.to_string())
        }
    }

    /// Short label used in report reasons (e.g. "Request failed: timeout")
    pub fn label(&self) -> &'static str {
        match self {
            AuditError::MissingUrl => "missing url",
            AuditError::InvalidUrlScheme | AuditError::InvalidUrl(_) => "invalid url",
            AuditError::ClientBuildError(_) => "client build",
            AuditError::Timeout => "timeout",
            AuditError::ConnectError(_) => "connect",
            AuditError::RequestError(_) => "request",
        }
    }
}
