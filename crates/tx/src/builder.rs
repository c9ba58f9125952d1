//! Transaction builders.
//!
//! Helpers for building and signing the envelopes clients submit for
//! simulation: upload contract code, create a contract, invoke a contract.
//! Used by the CLI and throughout the test suites.
//!
//! ```
//! use soroban_rpc_common::NetworkId;
//! use soroban_rpc_crypto::SecretKey;
//! use soroban_rpc_tx::builder::{install_contract_code_op, TransactionBuilder};
//!
//! let key = SecretKey::from_seed(&[1u8; 32]);
//! let (op, code_hash) = install_contract_code_op(b"wasm".to_vec()).unwrap();
//! let envelope = TransactionBuilder::new(&key.public_key(), 1)
//!     .operation(op)
//!     .sign(&key, &NetworkId::testnet())
//!     .unwrap();
//! # let _ = (envelope, code_hash);
//! ```

use soroban_rpc_common::{Hash256, NetworkId};
use soroban_rpc_crypto::{xdr_sha256, PublicKey, SecretKey};
use stellar_xdr::curr::{
    AccountId, BytesM, ContractExecutable, ContractIdPreimage, ContractIdPreimageFromAddress,
    CreateContractArgs, DecoratedSignature, HostFunction, InvokeContractArgs,
    InvokeHostFunctionOp, LedgerFootprint, Memo, MuxedAccount, Operation, OperationBody,
    Preconditions, ScAddress, ScSymbol, ScVal, SequenceNumber, SignatureHint,
    SorobanResources, SorobanTransactionData, SorobanTransactionDataExt, Transaction,
    TransactionEnvelope, TransactionExt, TransactionSignaturePayload,
    TransactionSignaturePayloadTaggedTransaction, TransactionV1Envelope, Uint256, VecM,
};

use crate::contract_id::{contract_code_hash, contract_code_key};
use crate::error::TxError;

/// Default fee, in stroops.
pub const DEFAULT_FEE: u32 = 100;

/// Builder for single-source V1 transactions.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: MuxedAccount,
    sequence: i64,
    fee: u32,
    operations: Vec<Operation>,
    footprint: Option<LedgerFootprint>,
}

impl TransactionBuilder {
    pub fn new(source: &PublicKey, sequence: i64) -> Self {
        Self {
            source: source.into(),
            sequence,
            fee: DEFAULT_FEE,
            operations: Vec::new(),
            footprint: None,
        }
    }

    pub fn fee(mut self, fee: u32) -> Self {
        self.fee = fee;
        self
    }

    pub fn operation(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Declares a Soroban footprint, attaching `SorobanTransactionData`.
    pub fn footprint(mut self, footprint: LedgerFootprint) -> Self {
        self.footprint = Some(footprint);
        self
    }

    pub fn build(self) -> Result<Transaction, TxError> {
        let ext = match self.footprint {
            None => TransactionExt::V0,
            Some(footprint) => TransactionExt::V1(SorobanTransactionData {
                ext: SorobanTransactionDataExt::V0,
                resources: SorobanResources {
                    footprint,
                    instructions: 0,
                    disk_read_bytes: 0,
                    write_bytes: 0,
                },
                resource_fee: 0,
            }),
        };
        Ok(Transaction {
            source_account: self.source,
            fee: self.fee,
            seq_num: SequenceNumber(self.sequence),
            cond: Preconditions::None,
            memo: Memo::None,
            operations: self.operations.try_into()?,
            ext,
        })
    }

    /// Builds the transaction and signs it with `key` for `network`.
    pub fn sign(self, key: &SecretKey, network: &NetworkId) -> Result<TransactionEnvelope, TxError> {
        sign_transaction(key, self.build()?, network)
    }
}

/// Signs `tx` for `network`, producing a V1 envelope with one signature.
pub fn sign_transaction(
    key: &SecretKey,
    tx: Transaction,
    network: &NetworkId,
) -> Result<TransactionEnvelope, TxError> {
    let payload = TransactionSignaturePayload {
        network_id: (*network).into(),
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(tx.clone()),
    };
    let hash = xdr_sha256(&payload)?;
    let signature = key.sign(hash.as_bytes());
    let decorated = DecoratedSignature {
        hint: SignatureHint(key.public_key().hint()),
        signature: signature.try_into()?,
    };
    Ok(TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: vec![decorated].try_into()?,
    }))
}

fn host_function_op(host_function: HostFunction) -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function,
            auth: VecM::default(),
        }),
    }
}

/// An upload-code operation and the hash the code will be stored under.
pub fn install_contract_code_op(code: Vec<u8>) -> Result<(Operation, Hash256), TxError> {
    let code: BytesM = code.try_into()?;
    let hash = contract_code_hash(&code)?;
    Ok((host_function_op(HostFunction::UploadContractWasm(code)), hash))
}

/// A create-contract operation deploying `wasm_hash` from `deployer` with `salt`.
pub fn create_contract_op(deployer: &AccountId, salt: [u8; 32], wasm_hash: Hash256) -> Operation {
    host_function_op(HostFunction::CreateContract(CreateContractArgs {
        contract_id_preimage: ContractIdPreimage::Address(ContractIdPreimageFromAddress {
            address: ScAddress::Account(deployer.clone()),
            salt: Uint256(salt),
        }),
        executable: ContractExecutable::Wasm(wasm_hash.into()),
    }))
}

/// An invoke-contract operation calling `function` with `args`.
pub fn invoke_contract_op(
    contract_id: Hash256,
    function: &str,
    args: Vec<ScVal>,
) -> Result<Operation, TxError> {
    Ok(host_function_op(HostFunction::InvokeContract(
        InvokeContractArgs {
            contract_address: ScAddress::Contract(contract_id.into()),
            function_name: ScSymbol(function.try_into()?),
            args: args.try_into()?,
        },
    )))
}

/// Sets the per-operation source account.
pub fn with_source(mut op: Operation, source: &PublicKey) -> Operation {
    op.source_account = Some(source.into());
    op
}

/// Builds and signs an upload-code transaction that declares its code key
/// as read-write.
pub fn build_install_contract_code_tx(
    code: Vec<u8>,
    sequence: i64,
    fee: u32,
    network: &NetworkId,
    key: &SecretKey,
) -> Result<(TransactionEnvelope, Hash256), TxError> {
    let (op, hash) = install_contract_code_op(code)?;
    let footprint = LedgerFootprint {
        read_only: VecM::default(),
        read_write: vec![contract_code_key(hash)].try_into()?,
    };
    let envelope = TransactionBuilder::new(&key.public_key(), sequence)
        .fee(fee)
        .operation(op)
        .footprint(footprint)
        .sign(key, network)?;
    Ok((envelope, hash))
}
