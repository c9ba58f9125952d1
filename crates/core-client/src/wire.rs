//! JSON wire format of core's preflight endpoint.
//!
//! Request:
//!
//! ```json
//! { "source_account": "G...", "op": "<base64 InvokeHostFunctionOp>", "footprint": "<base64 LedgerFootprint>" }
//! ```
//!
//! Response:
//!
//! ```json
//! { "status": "OK", "result": "<base64 XDR value>", "footprint": "<base64 LedgerFootprint>",
//!   "cpu_insns": 1234, "mem_bytes": 5678, "ledger": 42 }
//! { "status": "ERROR", "detail": "HostError: ...", "ledger": 42 }
//! ```

use serde::{Deserialize, Serialize};
use soroban_rpc_common::xdr::{decode_base64, from_base64, to_base64};
use soroban_rpc_crypto::encode_account_id;
use soroban_rpc_tx::SimulationRequest;
use stellar_xdr::curr::{LedgerFootprint, PublicKey};

use crate::client::{SimulationOutcome, SimulationResult};
use crate::error::BackendError;

/// Path of the preflight endpoint, relative to the core base URL.
pub const PREFLIGHT_PATH: &str = "preflight";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightRequest {
    pub source_account: String,
    pub op: String,
    pub footprint: String,
}

impl PreflightRequest {
    pub fn from_request(request: &SimulationRequest) -> Result<Self, BackendError> {
        let PublicKey::PublicKeyTypeEd25519(key) = &request.source_account.0;
        let footprint = request
            .footprint
            .to_xdr()
            .map_err(soroban_rpc_common::Error::from)?;
        Ok(Self {
            source_account: encode_account_id(&key.0),
            op: to_base64(&request.op)?,
            footprint: to_base64(&footprint)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PreflightStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightResponse {
    pub status: PreflightStatus,
    #[serde(default)]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default)]
    pub footprint: String,
    #[serde(default)]
    pub cpu_insns: u64,
    #[serde(default)]
    pub mem_bytes: u64,
    #[serde(default)]
    pub ledger: i64,
}

impl PreflightResponse {
    /// Converts to a [`SimulationOutcome`].
    ///
    /// The footprint is decoded; the result value only has to be base64 and
    /// is kept as sent.
    pub fn into_outcome(self) -> Result<SimulationOutcome, BackendError> {
        if self.status == PreflightStatus::Error {
            return Ok(SimulationOutcome::ExecutionFailed {
                error: self.detail,
                latest_ledger: self.ledger,
            });
        }

        let footprint = if self.footprint.is_empty() {
            LedgerFootprint::default()
        } else {
            from_base64::<LedgerFootprint>(&self.footprint)
                .map_err(|e| BackendError::InvalidResponse(format!("footprint: {e}")))?
        };
        let results = match self.result.as_deref() {
            None | Some("") => Vec::new(),
            Some(encoded) => {
                decode_base64(encoded)
                    .map_err(|e| BackendError::InvalidResponse(format!("result: {e}")))?;
                vec![encoded.to_string()]
            }
        };

        Ok(SimulationOutcome::Success(SimulationResult {
            footprint,
            cpu_instructions: self.cpu_insns,
            memory_bytes: self.mem_bytes,
            results,
            latest_ledger: self.ledger,
        }))
    }
}
