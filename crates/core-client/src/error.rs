//! Backend client error types.

use std::time::Duration;

use thiserror::Error;

/// Transport-level failures talking to the simulation backend.
///
/// An execution failure reported by the backend is not an error here; it is
/// [`SimulationOutcome::ExecutionFailed`](crate::SimulationOutcome::ExecutionFailed).
#[derive(Debug, Error)]
pub enum BackendError {
    /// No complete response within the deadline.
    #[error("core did not respond within {deadline:?}")]
    Timeout { deadline: Duration },

    /// The backend could not be reached.
    #[error("core unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with something other than a preflight response.
    #[error("invalid response from core: {0}")]
    InvalidResponse(String),

    /// The request could not be encoded.
    #[error("failed to encode preflight request: {0}")]
    Encode(#[from] soroban_rpc_common::Error),

    /// The configured endpoint is not a valid URL.
    #[error("invalid core URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

impl BackendError {
    /// Classifies a reqwest failure from a request bounded by `deadline`.
    pub(crate) fn from_reqwest(err: reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            BackendError::Timeout { deadline }
        } else if err.is_connect() || err.is_request() {
            BackendError::Unreachable(err.to_string())
        } else {
            BackendError::InvalidResponse(err.to_string())
        }
    }
}
