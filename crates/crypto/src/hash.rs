//! SHA-256 hashing utilities.
//!
//! ```
//! use soroban_rpc_crypto::sha256;
//!
//! let hash = sha256(b"hello world");
//! ```

use soroban_rpc_common::Hash256;
use stellar_xdr::curr::WriteXdr;

/// Computes the SHA-256 hash of the given data.
pub fn sha256(data: &[u8]) -> Hash256 {
    Hash256::hash(data)
}

/// Computes the SHA-256 hash of an XDR-encoded value.
///
/// Contract identifiers, code hashes and transaction signature payloads are
/// all hashed this way.
pub fn xdr_sha256<T: WriteXdr>(value: &T) -> Result<Hash256, stellar_xdr::curr::Error> {
    Hash256::hash_xdr(value)
}
