//! Envelope decoding.
//!
//! [`decode`] parses a base64 `TransactionEnvelope` into an [`Envelope`], a
//! read-only view of the parts the simulation pipeline needs: the source
//! account, the ordered operations and the declared Soroban footprint.
//!
//! All three envelope kinds are accepted. A fee-bump envelope is viewed
//! through its inner transaction, since the inner transaction is what would
//! execute; a legacy `TxV0` envelope has no Soroban data and therefore an
//! empty declared footprint.

use base64::{engine::general_purpose::STANDARD, Engine};
use soroban_rpc_common::xdr::decode_limits;
use stellar_xdr::curr::{
    AccountId, FeeBumpTransactionInnerTx, LedgerFootprint, Operation, PublicKey, ReadXdr,
    Transaction, TransactionEnvelope, TransactionExt,
};

use crate::error::DecodeError;

/// Decoded, immutable view of a transaction envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    source_account: AccountId,
    operations: Vec<Operation>,
    declared_footprint: LedgerFootprint,
    fee_bump: bool,
}

impl Envelope {
    /// Builds the view from an already-parsed envelope.
    pub fn from_xdr(envelope: &TransactionEnvelope) -> Self {
        match envelope {
            TransactionEnvelope::TxV0(v0) => Self {
                source_account: AccountId(PublicKey::PublicKeyTypeEd25519(
                    v0.tx.source_account_ed25519.clone(),
                )),
                operations: v0.tx.operations.to_vec(),
                declared_footprint: LedgerFootprint::default(),
                fee_bump: false,
            },
            TransactionEnvelope::Tx(v1) => Self::from_transaction(&v1.tx, false),
            TransactionEnvelope::TxFeeBump(fee_bump) => match &fee_bump.tx.inner_tx {
                FeeBumpTransactionInnerTx::Tx(inner) => Self::from_transaction(&inner.tx, true),
            },
        }
    }

    fn from_transaction(tx: &Transaction, fee_bump: bool) -> Self {
        let declared_footprint = match &tx.ext {
            TransactionExt::V0 => LedgerFootprint::default(),
            TransactionExt::V1(data) => data.resources.footprint.clone(),
        };
        Self {
            source_account: tx.source_account.clone().account_id(),
            operations: tx.operations.to_vec(),
            declared_footprint,
            fee_bump,
        }
    }

    /// The transaction source account, with any muxed id stripped.
    pub fn source_account(&self) -> &AccountId {
        &self.source_account
    }

    /// Operations in envelope order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The footprint declared in the transaction's Soroban data.
    pub fn declared_footprint(&self) -> &LedgerFootprint {
        &self.declared_footprint
    }

    /// Whether the envelope was a fee-bump wrapper.
    pub fn is_fee_bump(&self) -> bool {
        self.fee_bump
    }
}

/// Decodes a base64-encoded XDR `TransactionEnvelope`.
///
/// # Errors
///
/// Returns [`DecodeError`] if the input is not valid base64, is not a
/// well-formed envelope, or carries trailing bytes after the envelope.
/// Whitespace around the base64 text counts as malformed.
pub fn decode(raw: &str) -> Result<Envelope, DecodeError> {
    let bytes = STANDARD.decode(raw)?;
    let envelope = TransactionEnvelope::from_xdr(&bytes, decode_limits(bytes.len()))?;
    Ok(Envelope::from_xdr(&envelope))
}
