//! Error types for transaction preparation.
//!
//! Decoding and validation failures are kept as separate enums because each
//! maps to its own client-facing message; [`TxError`] wraps both for the
//! end-to-end [`prepare`](crate::prepare) pipeline.

use soroban_rpc_crypto::CryptoError;
use thiserror::Error;

/// The submitted envelope could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not valid standard base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The bytes are not a complete, well-formed `TransactionEnvelope`.
    #[error("invalid transaction envelope: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),
}

/// The envelope decoded but is not a simulatable invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// More than one operation in the envelope.
    #[error("Transaction contains more than one operation")]
    TooManyOperations {
        /// Number of operations found.
        count: usize,
    },

    /// No host-function invocation in the envelope.
    #[error("Transaction does not contain invoke host function operation")]
    NoInvocationOperation,
}

/// Errors from the transaction preparation pipeline.
#[derive(Debug, Error)]
pub enum TxError {
    /// Envelope decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Envelope validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// XDR encoding failed while deriving identifiers or building output.
    #[error("XDR error: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),

    /// Signing failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
