//! Cryptographic primitives for the Soroban simulation gateway.
//!
//! - **SHA-256 hashing**: [`sha256`] and [`xdr_sha256`]
//! - **Ed25519 keys**: [`SecretKey`], [`PublicKey`] and [`Signature`], used to
//!   build and sign test and CLI transactions
//! - **StrKey encoding**: Stellar's base32 format for account ids (`G...`),
//!   seeds (`S...`), muxed accounts (`M...`) and contracts (`C...`)
//!
//! # Example
//!
//! ```
//! use soroban_rpc_crypto::{SecretKey, sha256};
//!
//! let secret = SecretKey::generate();
//! let public = secret.public_key();
//!
//! let signature = secret.sign(b"hello stellar");
//! assert!(public.verify(b"hello stellar", &signature).is_ok());
//!
//! let hash = sha256(b"stellar");
//! ```

mod error;
mod hash;
mod keys;
mod strkey;

pub use error::CryptoError;
pub use hash::*;
pub use keys::*;
pub use strkey::*;

// Re-export Hash256 from common for convenience
pub use soroban_rpc_common::Hash256;
