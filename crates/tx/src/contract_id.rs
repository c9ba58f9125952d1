//! Deterministic contract identifiers and contract ledger keys.
//!
//! A contract id is the SHA-256 of the XDR-encoded
//! `HashIdPreimage::ContractId { network_id, contract_id_preimage }`. The
//! backend performs the same derivation when it executes the transaction,
//! so these functions must agree with it byte-for-byte.

use soroban_rpc_common::{Hash256, NetworkId};
use stellar_xdr::curr::{
    AccountId, BytesM, ContractDataDurability, ContractIdPreimage, ContractIdPreimageFromAddress,
    HashIdPreimage, HashIdPreimageContractId, LedgerKey, LedgerKeyContractCode,
    LedgerKeyContractData, ScAddress, ScVal, Uint256,
};

/// Hash of uploaded contract code: SHA-256 of the code's XDR encoding.
pub fn contract_code_hash(code: &BytesM) -> Result<Hash256, stellar_xdr::curr::Error> {
    Hash256::hash_xdr(code)
}

/// Derives a contract id from an arbitrary preimage.
pub fn derive_contract_id(
    network: &NetworkId,
    preimage: &ContractIdPreimage,
) -> Result<Hash256, stellar_xdr::curr::Error> {
    let preimage = HashIdPreimage::ContractId(HashIdPreimageContractId {
        network_id: (*network).into(),
        contract_id_preimage: preimage.clone(),
    });
    Hash256::hash_xdr(&preimage)
}

/// Derives the id of a contract deployed by `deployer` with `salt`.
pub fn derive_account_contract_id(
    network: &NetworkId,
    deployer: &AccountId,
    salt: &Uint256,
) -> Result<Hash256, stellar_xdr::curr::Error> {
    derive_contract_id(
        network,
        &ContractIdPreimage::Address(ContractIdPreimageFromAddress {
            address: ScAddress::Account(deployer.clone()),
            salt: salt.clone(),
        }),
    )
}

/// Ledger key of uploaded contract code.
pub fn contract_code_key(hash: Hash256) -> LedgerKey {
    LedgerKey::ContractCode(LedgerKeyContractCode { hash: hash.into() })
}

/// Ledger key of a contract's instance entry.
pub fn contract_instance_key(contract_id: Hash256) -> LedgerKey {
    LedgerKey::ContractData(LedgerKeyContractData {
        contract: ScAddress::Contract(contract_id.into()),
        key: ScVal::LedgerKeyContractInstance,
        durability: ContractDataDurability::Persistent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_rpc_crypto::sha256;
    use stellar_xdr::curr::PublicKey;

    fn account(bytes: [u8; 32]) -> AccountId {
        AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(bytes)))
    }

    #[test]
    fn test_known_contract_id() {
        let salt = Uint256(sha256(b"a1").0);
        let id = derive_account_contract_id(&NetworkId::standalone(), &account([7u8; 32]), &salt)
            .unwrap();
        assert_eq!(
            id.to_hex(),
            "00f3166639bff0fd92c4e8c8d7c636afd83a55491747297a24080f8fba406b67"
        );
    }

    #[test]
    fn test_contract_id_depends_on_network() {
        let salt = Uint256([0u8; 32]);
        let deployer = account([7u8; 32]);
        let standalone =
            derive_account_contract_id(&NetworkId::standalone(), &deployer, &salt).unwrap();
        let testnet = derive_account_contract_id(&NetworkId::testnet(), &deployer, &salt).unwrap();
        assert_ne!(standalone, testnet);
    }

    #[test]
    fn test_code_hash_of_known_payload() {
        let code: BytesM = b"a contract".to_vec().try_into().unwrap();
        assert_eq!(
            contract_code_hash(&code).unwrap().to_hex(),
            "ea9fcb81ae54a29f6b3bf293847d3fd7e9a369fd1c80acafec6abd571317e0c2"
        );
    }
}
