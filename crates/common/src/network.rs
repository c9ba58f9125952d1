//! Network identity types.
//!
//! Each Stellar network is identified by a passphrase; the network id is the
//! SHA-256 hash of that passphrase. The network id enters every derived
//! contract identifier and every transaction signature payload, so a
//! simulation is only meaningful for the network the gateway is configured
//! for.
//!
//! | Network | Passphrase |
//! |---------|------------|
//! | Mainnet | `"Public Global Stellar Network ; September 2015"` |
//! | Testnet | `"Test SDF Network ; September 2015"` |
//! | Futurenet | `"Test SDF Future Network ; October 2022"` |
//! | Standalone | `"Standalone Network ; February 2017"` |
//!
//! # Example
//!
//! ```rust
//! use soroban_rpc_common::NetworkId;
//!
//! let standalone = NetworkId::standalone();
//! let custom = NetworkId::from_passphrase("Standalone Network ; February 2017");
//! assert_eq!(standalone, custom);
//! ```

use crate::types::Hash256;

/// Passphrase of the Stellar public network.
pub const MAINNET_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
/// Passphrase of the SDF test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
/// Passphrase of the SDF future network.
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";
/// Passphrase used by local standalone networks.
pub const STANDALONE_PASSPHRASE: &str = "Standalone Network ; February 2017";

/// A unique identifier for a Stellar network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkId(pub Hash256);

impl NetworkId {
    /// Creates a network ID from a passphrase string: `SHA256(passphrase)`.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self(Hash256::hash(passphrase.as_bytes()))
    }

    /// Returns a reference to the underlying 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Returns the network ID for the Stellar public testnet.
    pub fn testnet() -> Self {
        Self::from_passphrase(TESTNET_PASSPHRASE)
    }

    /// Returns the network ID for the Stellar public mainnet.
    pub fn mainnet() -> Self {
        Self::from_passphrase(MAINNET_PASSPHRASE)
    }

    /// Returns the network ID for futurenet.
    pub fn futurenet() -> Self {
        Self::from_passphrase(FUTURENET_PASSPHRASE)
    }

    /// Returns the network ID used by local standalone networks.
    pub fn standalone() -> Self {
        Self::from_passphrase(STANDALONE_PASSPHRASE)
    }
}

impl From<NetworkId> for stellar_xdr::curr::Hash {
    fn from(id: NetworkId) -> Self {
        stellar_xdr::curr::Hash(id.0 .0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_ids_differ() {
        assert_ne!(NetworkId::testnet(), NetworkId::mainnet());
        assert_ne!(NetworkId::standalone(), NetworkId::futurenet());
    }

    #[test]
    fn test_testnet_known_id() {
        assert_eq!(
            NetworkId::testnet().0.to_hex(),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }
}
