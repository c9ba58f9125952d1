//! Ed25519 key types.
//!
//! - [`PublicKey`]: a 32-byte Ed25519 verifying key, displayed as `G...`
//! - [`SecretKey`]: a 32-byte Ed25519 signing key, displayed redacted
//! - [`Signature`]: a 64-byte Ed25519 signature
//!
//! The gateway itself never signs anything; these types back the
//! transaction builders used by the CLI and by tests, and
//! [`SecretKey::network_root`] reproduces the well-known root account of a
//! network from its passphrase.
//!
//! ```
//! use soroban_rpc_crypto::SecretKey;
//!
//! let root = SecretKey::network_root("Standalone Network ; February 2017");
//! assert_eq!(
//!     root.public_key().to_strkey(),
//!     "GBZXN7PIRZGNMHGA7MUUUF4GWPY5AYPV6LY4UV2GL6VJGIQRXFDNMADI"
//! );
//! ```

use crate::error::CryptoError;
use crate::hash::sha256;
use crate::strkey;
use ed25519_dalek::{SigningKey, VerifyingKey};
use std::fmt;

/// An Ed25519 public key (verifying key).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Creates a public key from raw 32-byte Ed25519 key material.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the bytes do not represent
    /// a valid point on the Ed25519 curve.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let key = VerifyingKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(key))
    }

    /// Returns the raw 32-byte key material.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Verifies an Ed25519 signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        use ed25519_dalek::Verifier;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        self.0
            .verify(message, &sig)
            .map_err(|_| CryptoError::InvalidSignature)
    }

    /// Encodes the public key as a Stellar account ID (G...).
    pub fn to_strkey(&self) -> String {
        strkey::encode_account_id(self.as_bytes())
    }

    /// Parses a public key from a Stellar account ID (G...).
    pub fn from_strkey(s: &str) -> Result<Self, CryptoError> {
        let bytes = strkey::decode_account_id(s)?;
        Self::from_bytes(&bytes)
    }

    /// The last four bytes of the key, used as the signature hint.
    pub fn hint(&self) -> [u8; 4] {
        let bytes = self.as_bytes();
        [bytes[28], bytes[29], bytes[30], bytes[31]]
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_strkey())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_strkey())
    }
}

impl TryFrom<&stellar_xdr::curr::PublicKey> for PublicKey {
    type Error = CryptoError;

    fn try_from(xdr: &stellar_xdr::curr::PublicKey) -> Result<Self, Self::Error> {
        match xdr {
            stellar_xdr::curr::PublicKey::PublicKeyTypeEd25519(stellar_xdr::curr::Uint256(
                bytes,
            )) => Self::from_bytes(bytes),
        }
    }
}

impl From<&PublicKey> for stellar_xdr::curr::PublicKey {
    fn from(pk: &PublicKey) -> Self {
        stellar_xdr::curr::PublicKey::PublicKeyTypeEd25519(stellar_xdr::curr::Uint256(
            *pk.as_bytes(),
        ))
    }
}

impl From<&PublicKey> for stellar_xdr::curr::AccountId {
    fn from(pk: &PublicKey) -> Self {
        stellar_xdr::curr::AccountId(pk.into())
    }
}

impl From<&PublicKey> for stellar_xdr::curr::MuxedAccount {
    fn from(pk: &PublicKey) -> Self {
        stellar_xdr::curr::MuxedAccount::Ed25519(stellar_xdr::curr::Uint256(*pk.as_bytes()))
    }
}

/// An Ed25519 secret key (signing key).
///
/// The `Debug` implementation does not reveal key material; the underlying
/// `SigningKey` zeroizes itself on drop.
pub struct SecretKey {
    inner: SigningKey,
}

impl SecretKey {
    /// Generates a new random secret key from the OS random number generator.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            inner: SigningKey::generate(&mut csprng),
        }
    }

    /// Creates a secret key from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            inner: SigningKey::from_bytes(seed),
        }
    }

    /// The root account key of a network: its seed is `SHA256(passphrase)`.
    pub fn network_root(passphrase: &str) -> Self {
        Self::from_seed(sha256(passphrase.as_bytes()).as_bytes())
    }

    /// Signs a message, producing a 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        use ed25519_dalek::Signer;
        Signature(self.inner.sign(message).to_bytes())
    }

    /// Derives the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.inner.verifying_key())
    }

    /// Encodes the secret key as a Stellar seed (S...).
    pub fn to_strkey(&self) -> String {
        strkey::encode_secret_seed(self.inner.as_bytes())
    }

    /// Parses a secret key from a Stellar seed (S...).
    pub fn from_strkey(s: &str) -> Result<Self, CryptoError> {
        let bytes = strkey::decode_secret_seed(s)?;
        Ok(Self::from_seed(&bytes))
    }

    /// Returns the raw 32-byte seed.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.inner.as_bytes()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

impl Clone for SecretKey {
    fn clone(&self) -> Self {
        Self {
            inner: SigningKey::from_bytes(self.inner.as_bytes()),
        }
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Returns the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(&self.0[..8]))
    }
}

impl TryFrom<Signature> for stellar_xdr::curr::Signature {
    type Error = CryptoError;

    fn try_from(sig: Signature) -> Result<Self, Self::Error> {
        Ok(stellar_xdr::curr::Signature(sig.0.to_vec().try_into()?))
    }
}

impl TryFrom<&stellar_xdr::curr::Signature> for Signature {
    type Error = CryptoError;

    fn try_from(xdr: &stellar_xdr::curr::Signature) -> Result<Self, Self::Error> {
        let bytes: [u8; 64] =
            xdr.0
                .as_slice()
                .try_into()
                .map_err(|_| CryptoError::InvalidLength {
                    expected: 64,
                    got: xdr.0.len(),
                })?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_root_key() {
        let root = SecretKey::network_root("Standalone Network ; February 2017");
        assert_eq!(
            root.to_strkey(),
            "SC5O7VZUXDJ6JBDSZ74DSERXL7W3Y5LTOAMRF7RQRL3TAGAPS7LUVG3L"
        );
        assert_eq!(
            hex::encode(root.public_key().as_bytes()),
            "7376fde88e4cd61cc0fb294a1786b3f1d061f5f2f1ca57465faa932211b946d6"
        );
    }

    #[test]
    fn test_signing() {
        let secret = SecretKey::generate();
        let public = secret.public_key();

        let signature = secret.sign(b"hello world");
        assert!(public.verify(b"hello world", &signature).is_ok());
        assert!(public.verify(b"wrong message", &signature).is_err());
    }

    #[test]
    fn test_strkey_roundtrip() {
        let secret = SecretKey::generate();
        let parsed = SecretKey::from_strkey(&secret.to_strkey()).unwrap();
        assert_eq!(secret.as_bytes(), parsed.as_bytes());
        assert_eq!(
            PublicKey::from_strkey(&secret.public_key().to_strkey()).unwrap(),
            secret.public_key()
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let secret = SecretKey::from_seed(&[3u8; 32]);
        assert_eq!(format!("{:?}", secret), "SecretKey([REDACTED])");
    }

    #[test]
    fn test_signature_to_xdr() {
        let secret = SecretKey::from_seed(&[3u8; 32]);
        let sig = secret.sign(b"payload");
        let xdr: stellar_xdr::curr::Signature = sig.try_into().unwrap();
        assert_eq!(Signature::try_from(&xdr).unwrap(), sig);
    }
}
