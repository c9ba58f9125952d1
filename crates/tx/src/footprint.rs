//! Footprint resolution.
//!
//! A [`Footprint`] is the pair of ledger-key sets an invocation reads and
//! writes. Sets are kept in the XDR type's canonical order with no
//! duplicates, and a key present in both sets is kept only as read-write.
//!
//! [`resolve`] computes the footprint to send with a simulation request:
//!
//! | Operation | Footprint |
//! |-----------|-----------|
//! | Install code | declared; if empty, read-write `ContractCode(code hash)` |
//! | Create contract | declared, plus read-write instance key and read-only code key |
//! | Invoke contract | declared |

use std::collections::BTreeSet;

use soroban_rpc_common::NetworkId;
use stellar_xdr::curr::{
    AccountId, ContractExecutable, ContractIdPreimage, LedgerFootprint, LedgerKey, ScAddress,
};
use tracing::{debug, warn};

use crate::contract_id::{
    contract_code_hash, contract_code_key, contract_instance_key, derive_account_contract_id,
    derive_contract_id,
};
use crate::error::TxError;
use crate::operation::HostOperation;

/// Normalized read-only / read-write ledger key sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footprint {
    read_only: BTreeSet<LedgerKey>,
    read_write: BTreeSet<LedgerKey>,
}

impl Footprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes an XDR footprint.
    pub fn from_xdr(footprint: &LedgerFootprint) -> Self {
        let mut normalized = Self::new();
        for key in footprint.read_write.iter() {
            normalized.insert_read_write(key.clone());
        }
        for key in footprint.read_only.iter() {
            normalized.insert_read_only(key.clone());
        }
        normalized
    }

    /// Adds a read-only key unless it is already read-write.
    pub fn insert_read_only(&mut self, key: LedgerKey) {
        if !self.read_write.contains(&key) {
            self.read_only.insert(key);
        }
    }

    /// Adds a read-write key, promoting it if it was read-only.
    pub fn insert_read_write(&mut self, key: LedgerKey) {
        self.read_only.remove(&key);
        self.read_write.insert(key);
    }

    /// Unions `other` into `self`.
    pub fn merge(&mut self, other: &Footprint) {
        for key in &other.read_write {
            self.insert_read_write(key.clone());
        }
        for key in &other.read_only {
            self.insert_read_only(key.clone());
        }
    }

    pub fn read_only(&self) -> impl Iterator<Item = &LedgerKey> {
        self.read_only.iter()
    }

    pub fn read_write(&self) -> impl Iterator<Item = &LedgerKey> {
        self.read_write.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.read_only.is_empty() && self.read_write.is_empty()
    }

    /// Total number of keys across both sets.
    pub fn len(&self) -> usize {
        self.read_only.len() + self.read_write.len()
    }

    /// Encodes the footprint as XDR, in canonical key order.
    pub fn to_xdr(&self) -> Result<LedgerFootprint, stellar_xdr::curr::Error> {
        Ok(LedgerFootprint {
            read_only: self.read_only.iter().cloned().collect::<Vec<_>>().try_into()?,
            read_write: self.read_write.iter().cloned().collect::<Vec<_>>().try_into()?,
        })
    }
}

/// Resolves the footprint for `operation` executed by `source` on `network`.
///
/// `source` is the effective source account from validation. For contract
/// creation it is the deployer used in the id derivation, whatever account
/// the preimage itself names.
pub fn resolve(
    operation: &HostOperation,
    source: &AccountId,
    network: &NetworkId,
) -> Result<Footprint, TxError> {
    let Some(invocation) = operation.invocation() else {
        return Ok(Footprint::new());
    };
    let mut footprint = Footprint::from_xdr(&invocation.declared_footprint);

    match operation {
        HostOperation::InstallContractCode { code, .. } => {
            if footprint.is_empty() {
                let hash = contract_code_hash(code)?;
                debug!(code_hash = %hash, "Filling install footprint from code hash");
                footprint.insert_read_write(contract_code_key(hash));
            }
        }
        HostOperation::CreateContract {
            preimage,
            executable,
            ..
        } => {
            let contract_id = match preimage {
                ContractIdPreimage::Address(from_address) => match &from_address.address {
                    ScAddress::Account(named) => {
                        if named != source {
                            warn!(
                                preimage_account = ?named,
                                source_account = ?source,
                                "Contract id preimage names a different account than the operation source; deriving from the source"
                            );
                        }
                        derive_account_contract_id(network, source, &from_address.salt)?
                    }
                    _ => derive_contract_id(network, preimage)?,
                },
                ContractIdPreimage::Asset(_) => derive_contract_id(network, preimage)?,
            };
            debug!(contract_id = %contract_id, "Derived contract id");

            footprint.insert_read_write(contract_instance_key(contract_id));
            if let ContractExecutable::Wasm(hash) = executable {
                footprint.insert_read_only(contract_code_key(hash.clone().into()));
            }
        }
        HostOperation::InvokeContract { .. } | HostOperation::Other { .. } => {}
    }

    Ok(footprint)
}
