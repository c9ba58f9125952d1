//! Invocation validation.
//!
//! Simulation handles exactly one host-function invocation per envelope.
//! [`validate`] enforces that and resolves the effective source account:
//! the operation's own source if it has one, otherwise the envelope's.

use stellar_xdr::curr::{AccountId, InvokeHostFunctionOp};
use tracing::debug;

use crate::envelope::Envelope;
use crate::error::ValidationError;
use crate::operation::HostOperation;

/// A single host-function invocation with its effective source resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInvocation {
    /// The classified operation; never [`HostOperation::Other`].
    pub operation: HostOperation,
    /// Operation source override, or the envelope source.
    pub source_account: AccountId,
    /// The invocation body to forward to the backend.
    pub host_function_op: InvokeHostFunctionOp,
}

/// Checks that `envelope` holds exactly one host-function invocation.
///
/// # Errors
///
/// - [`ValidationError::TooManyOperations`] if there is more than one
///   operation, whatever their types
/// - [`ValidationError::NoInvocationOperation`] if there are no operations
///   or the single operation is not a host-function invocation
pub fn validate(envelope: &Envelope) -> Result<ValidatedInvocation, ValidationError> {
    let operations = envelope.operations();
    if operations.len() > 1 {
        return Err(ValidationError::TooManyOperations {
            count: operations.len(),
        });
    }
    let Some(op) = operations.first() else {
        return Err(ValidationError::NoInvocationOperation);
    };

    let operation = HostOperation::classify(op, envelope.declared_footprint());
    let Some(invocation) = operation.invocation() else {
        debug!(operation = operation.name(), "Rejecting non-invocation operation");
        return Err(ValidationError::NoInvocationOperation);
    };

    let source_account = invocation
        .source_account
        .clone()
        .unwrap_or_else(|| envelope.source_account().clone());
    let host_function_op = invocation.op.clone();

    Ok(ValidatedInvocation {
        operation,
        source_account,
        host_function_op,
    })
}
