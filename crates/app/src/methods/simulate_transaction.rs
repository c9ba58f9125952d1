//! The `simulateTransaction` method and its response assembler.
//!
//! The handler runs the preparation pipeline, hands the prepared request to
//! the simulation backend under the configured deadline, and folds whatever
//! came back into a [`SimulateTransactionResponse`]. Every pipeline failure
//! becomes the response's `error` field; the JSON-RPC call itself succeeds.
//!
//! | Failure | `error` |
//! |---------|---------|
//! | undecodable envelope | [`UNMARSHAL_ERROR`] |
//! | more than one operation | [`TOO_MANY_OPERATIONS_ERROR`] |
//! | no invoke-host-function operation | [`NO_INVOCATION_ERROR`] |
//! | backend timeout, unreachable, bad response | [`CORE_SUBMIT_ERROR`] |
//! | execution failed in the backend | backend text, verbatim |
//!
//! The one exception is a successful result that cannot be re-encoded; that
//! fails the JSON-RPC call with an internal error.

use serde::{Deserialize, Serialize};
use soroban_rpc_common::xdr::to_base64;
use soroban_rpc_core_client::{BackendError, SimulationOutcome, SimulationResult};
use soroban_rpc_tx::{prepare, TxError, ValidationError};
use tracing::{debug, error, warn};

use crate::jsonrpc::RpcError;
use crate::server::ServerState;

pub const UNMARSHAL_ERROR: &str = "Could not unmarshal transaction";
pub const TOO_MANY_OPERATIONS_ERROR: &str = "Transaction contains more than one operation";
pub const NO_INVOCATION_ERROR: &str =
    "Transaction does not contain invoke host function operation";
pub const CORE_SUBMIT_ERROR: &str = "Could not submit request to core";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateTransactionRequest {
    /// Base64 XDR `TransactionEnvelope`.
    pub transaction: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransactionCost {
    pub cpu_instructions: u64,
    pub memory_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeHostFunctionResult {
    /// Base64 XDR value, exactly as core returned it.
    pub xdr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransactionResponse {
    /// Base64 XDR `LedgerFootprint`; empty on failure.
    #[serde(default)]
    pub footprint: String,
    #[serde(default)]
    pub cost: SimulateTransactionCost,
    #[serde(default)]
    pub results: Vec<InvokeHostFunctionResult>,
    #[serde(default)]
    pub latest_ledger: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulateTransactionResponse {
    /// A response carrying only an error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    fn from_result(result: &SimulationResult) -> Result<Self, soroban_rpc_common::Error> {
        let results = result
            .results
            .iter()
            .map(|xdr| InvokeHostFunctionResult { xdr: xdr.clone() })
            .collect();
        Ok(Self {
            footprint: to_base64(&result.footprint)?,
            cost: SimulateTransactionCost {
                cpu_instructions: result.cpu_instructions,
                memory_bytes: result.memory_bytes,
            },
            results,
            latest_ledger: result.latest_ledger,
            error: None,
        })
    }
}

/// Anything that stopped a simulation before the backend produced an outcome.
#[derive(Debug, thiserror::Error)]
pub enum SimulationFailure {
    #[error(transparent)]
    Prepare(#[from] TxError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl SimulationFailure {
    /// The fixed message shown to the caller.
    pub fn client_message(&self) -> &'static str {
        match self {
            SimulationFailure::Prepare(TxError::Validation(ValidationError::TooManyOperations {
                ..
            })) => TOO_MANY_OPERATIONS_ERROR,
            SimulationFailure::Prepare(TxError::Validation(
                ValidationError::NoInvocationOperation,
            )) => NO_INVOCATION_ERROR,
            SimulationFailure::Prepare(_) => UNMARSHAL_ERROR,
            SimulationFailure::Backend(_) => CORE_SUBMIT_ERROR,
        }
    }
}

/// Folds a pipeline outcome into the client-facing response.
///
/// An execution failure keeps the ledger the backend ran against; every
/// other failure leaves footprint, cost, results and ledger zeroed.
///
/// # Errors
///
/// Returns an internal [`RpcError`] only when a successful result cannot be
/// re-encoded.
pub fn assemble(
    outcome: Result<SimulationOutcome, SimulationFailure>,
) -> Result<SimulateTransactionResponse, RpcError> {
    let response = match outcome {
        Ok(SimulationOutcome::Success(result)) => {
            SimulateTransactionResponse::from_result(&result).map_err(encoding_failure)?
        }
        Ok(SimulationOutcome::ExecutionFailed {
            error,
            latest_ledger,
        }) => SimulateTransactionResponse {
            latest_ledger,
            error: Some(error),
            ..SimulateTransactionResponse::default()
        },
        Err(failure) => {
            match &failure {
                SimulationFailure::Prepare(err) => {
                    debug!(error = %err, "Rejected simulation request")
                }
                SimulationFailure::Backend(err) => {
                    warn!(error = %err, "Simulation backend request failed")
                }
            }
            SimulateTransactionResponse::failed(failure.client_message())
        }
    };
    Ok(response)
}

fn encoding_failure(err: soroban_rpc_common::Error) -> RpcError {
    error!(error = %err, "Could not encode simulation result");
    RpcError::internal("could not encode simulation result")
}

/// Runs one simulation end to end.
pub async fn simulate(
    state: &ServerState,
    request: &SimulateTransactionRequest,
) -> Result<SimulateTransactionResponse, RpcError> {
    let outcome = match prepare(&request.transaction, &state.network_id) {
        Ok(prepared) => state
            .backend
            .simulate(&prepared, state.core_timeout)
            .await
            .map_err(SimulationFailure::from),
        Err(err) => Err(SimulationFailure::from(err)),
    };
    assemble(outcome)
}

/// JSON-RPC entry point.
pub async fn handle(
    state: &ServerState,
    params: Option<serde_json::Value>,
) -> Result<serde_json::Value, RpcError> {
    let request: SimulateTransactionRequest = crate::jsonrpc::parse_params(params)?;
    let response = simulate(state, &request).await?;
    serde_json::to_value(response).map_err(RpcError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_rpc_tx::DecodeError;
    use std::time::Duration;
    use stellar_xdr::curr::LedgerFootprint;

    #[test]
    fn test_client_messages() {
        let too_many = SimulationFailure::from(TxError::from(ValidationError::TooManyOperations {
            count: 2,
        }));
        assert_eq!(too_many.client_message(), TOO_MANY_OPERATIONS_ERROR);

        let none = SimulationFailure::from(TxError::from(ValidationError::NoInvocationOperation));
        assert_eq!(none.client_message(), NO_INVOCATION_ERROR);

        let decode = soroban_rpc_tx::decode("%%%").unwrap_err();
        assert!(matches!(decode, DecodeError::Base64(_)));
        let decode = SimulationFailure::from(TxError::from(decode));
        assert_eq!(decode.client_message(), UNMARSHAL_ERROR);

        let timeout = SimulationFailure::from(BackendError::Timeout {
            deadline: Duration::from_secs(1),
        });
        assert_eq!(timeout.client_message(), CORE_SUBMIT_ERROR);
    }

    #[test]
    fn test_assemble_success() {
        let response = assemble(Ok(SimulationOutcome::Success(SimulationResult {
            footprint: LedgerFootprint {
                read_only: Default::default(),
                read_write: Default::default(),
            },
            cpu_instructions: 10,
            memory_bytes: 20,
            results: vec!["AAAAAQ==".to_string()],
            latest_ledger: 3,
        })))
        .unwrap();
        assert_eq!(response.footprint, "AAAAAAAAAAA=");
        assert_eq!(response.cost.cpu_instructions, 10);
        assert_eq!(response.cost.memory_bytes, 20);
        assert_eq!(response.results[0].xdr, "AAAAAQ==");
        assert_eq!(response.latest_ledger, 3);
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_assemble_execution_failure_keeps_ledger() {
        let response = assemble(Ok(SimulationOutcome::ExecutionFailed {
            error: "HostError: InputArgsWrongLength".to_string(),
            latest_ledger: 12,
        }))
        .unwrap();
        assert!(response.results.is_empty());
        assert!(response.footprint.is_empty());
        assert_eq!(response.latest_ledger, 12);
        assert_eq!(
            response.error.as_deref(),
            Some("HostError: InputArgsWrongLength")
        );
    }

    #[test]
    fn test_assemble_failure_is_error_only() {
        let response = assemble(Err(SimulationFailure::from(BackendError::Unreachable(
            "connection refused".to_string(),
        ))))
        .unwrap();
        assert_eq!(response, SimulateTransactionResponse::failed(CORE_SUBMIT_ERROR));
    }

    #[test]
    fn test_assemble_copies_results_verbatim() {
        let legacy = "AAAABAAAAAEAAAAGAAAAIOqfy4GuVKKfazvyk4R9P9fpo2n9HICsr+xqvVcTF+DC";
        let response = assemble(Ok(SimulationOutcome::Success(SimulationResult {
            footprint: LedgerFootprint::default(),
            cpu_instructions: 1,
            memory_bytes: 1,
            results: vec![legacy.to_string()],
            latest_ledger: 1,
        })))
        .unwrap();
        assert_eq!(response.results[0].xdr, legacy);
    }

    #[test]
    fn test_encoding_failure_is_internal_rpc_error() {
        let err = encoding_failure(soroban_rpc_common::Error::Xdr(
            stellar_xdr::curr::Error::Invalid,
        ));
        assert_eq!(err.code, -32603);
        assert_eq!(
            err.message,
            "internal server error: could not encode simulation result"
        );
    }

    #[test]
    fn test_response_json_shape() {
        let json = serde_json::to_value(SimulateTransactionResponse {
            footprint: "AAAAAAAAAAA=".to_string(),
            cost: SimulateTransactionCost {
                cpu_instructions: 1,
                memory_bytes: 2,
            },
            results: vec![InvokeHostFunctionResult {
                xdr: "AAAAAQ==".to_string(),
            }],
            latest_ledger: 7,
            error: None,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "footprint": "AAAAAAAAAAA=",
                "cost": {"cpuInstructions": 1, "memoryBytes": 2},
                "results": [{"xdr": "AAAAAQ=="}],
                "latestLedger": 7
            })
        );
    }
}
