//! Simulation request assembly.

use soroban_rpc_common::NetworkId;
use stellar_xdr::curr::{AccountId, InvokeHostFunctionOp};
use tracing::debug;

use crate::envelope::decode;
use crate::error::TxError;
use crate::footprint::{resolve, Footprint};
use crate::operation::OperationKind;
use crate::validate::{validate, ValidatedInvocation};

/// Everything the backend needs to execute one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub source_account: AccountId,
    pub op: InvokeHostFunctionOp,
    pub footprint: Footprint,
    pub kind: OperationKind,
}

impl SimulationRequest {
    /// Resolves the footprint for a validated invocation.
    pub fn from_validated(
        validated: ValidatedInvocation,
        network: &NetworkId,
    ) -> Result<Self, TxError> {
        let footprint = resolve(&validated.operation, &validated.source_account, network)?;
        Ok(Self {
            kind: validated.operation.kind(),
            source_account: validated.source_account,
            op: validated.host_function_op,
            footprint,
        })
    }
}

/// Runs decode, validate and footprint resolution on a base64 envelope.
pub fn prepare(raw: &str, network: &NetworkId) -> Result<SimulationRequest, TxError> {
    let envelope = decode(raw)?;
    let validated = validate(&envelope)?;
    let request = SimulationRequest::from_validated(validated, network)?;
    debug!(
        kind = %request.kind,
        read_only = request.footprint.read_only().count(),
        read_write = request.footprint.read_write().count(),
        fee_bump = envelope.is_fee_bump(),
        "Prepared simulation request"
    );
    Ok(request)
}
