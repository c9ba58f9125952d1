//! Common types and utilities for the Soroban simulation gateway.
//!
//! This crate provides the shared vocabulary used by every other crate in
//! the workspace:
//!
//! - [`Hash256`]: the 32-byte SHA-256 digest used for contract ids, code
//!   hashes and network ids
//! - [`NetworkId`]: a network identity derived from its passphrase
//! - [`enum@Error`] / [`Result`]: the broad error categories
//! - [`xdr`]: base64 XDR helpers used on every wire boundary

pub mod error;
pub mod network;
pub mod types;
pub mod xdr;

pub use error::{Error, Result};
pub use network::NetworkId;
pub use types::*;

/// Re-export stellar-xdr for convenience
pub use stellar_xdr;
