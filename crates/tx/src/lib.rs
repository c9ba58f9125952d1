//! Transaction preparation for Soroban simulation.
//!
//! This crate turns a caller-supplied, base64-encoded transaction envelope
//! into a [`SimulationRequest`] ready for the execution backend. The
//! pipeline is strictly linear:
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Decode | [`envelope`] | [`Envelope`] |
//! | Validate | [`validate`] | [`ValidatedInvocation`] |
//! | Resolve footprint | [`footprint`], [`contract_id`] | [`Footprint`] |
//! | Assemble request | [`request`] | [`SimulationRequest`] |
//!
//! Every stage is pure: nothing here touches the network or the ledger.
//!
//! # Example
//!
//! ```
//! use soroban_rpc_common::NetworkId;
//! use soroban_rpc_crypto::SecretKey;
//! use soroban_rpc_tx::{builder, prepare, OperationKind};
//!
//! let network = NetworkId::standalone();
//! let root = SecretKey::network_root("Standalone Network ; February 2017");
//! let (envelope, _hash) =
//!     builder::build_install_contract_code_tx(b"a contract".to_vec(), 1, 100, &network, &root)
//!         .unwrap();
//! let raw = soroban_rpc_common::xdr::to_base64(&envelope).unwrap();
//!
//! let request = prepare(&raw, &network).unwrap();
//! assert_eq!(request.kind, OperationKind::InstallContractCode);
//! assert_eq!(request.footprint.read_write().count(), 1);
//! ```

pub mod builder;
pub mod contract_id;
pub mod envelope;
mod error;
pub mod footprint;
pub mod operation;
pub mod request;
pub mod validate;

pub use envelope::{decode, Envelope};
pub use error::{DecodeError, TxError, ValidationError};
pub use footprint::{resolve, Footprint};
pub use operation::{HostInvocation, HostOperation, OperationKind};
pub use request::{prepare, SimulationRequest};
pub use validate::{validate, ValidatedInvocation};

/// Result type for transaction preparation.
pub type Result<T> = std::result::Result<T, TxError>;
