//! Common error types for the simulation gateway.
//!
//! [`enum@Error`] covers the broad failure categories shared by the
//! workspace crates. Crates with richer failure modes define their own
//! `thiserror` enums and wrap this one where needed.

use thiserror::Error;

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for gateway operations.
#[derive(Error, Debug)]
pub enum Error {
    /// XDR encoding/decoding error.
    #[error("XDR error: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),

    /// Base64 decoding error.
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid data error.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
