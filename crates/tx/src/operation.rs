//! Operation classification.
//!
//! Only host-function invocations can be simulated. [`HostOperation`] is the
//! closed set of shapes the pipeline distinguishes; every other operation
//! type collapses into [`HostOperation::Other`].
//!
//! | Host function | Variant |
//! |---------------|---------|
//! | `UploadContractWasm` | [`HostOperation::InstallContractCode`] |
//! | `CreateContract`, `CreateContractV2` | [`HostOperation::CreateContract`] |
//! | `InvokeContract` | [`HostOperation::InvokeContract`] |
//! | anything else | [`HostOperation::Other`] |

use std::fmt;

use stellar_xdr::curr::{
    AccountId, BytesM, ContractExecutable, ContractIdPreimage, HostFunction, InvokeContractArgs,
    InvokeHostFunctionOp, LedgerFootprint, Operation, OperationBody,
};

/// The parts of an invocation shared by every host-function variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInvocation {
    /// Per-operation source override, with any muxed id stripped.
    pub source_account: Option<AccountId>,
    /// The operation body forwarded verbatim to the backend.
    pub op: InvokeHostFunctionOp,
    /// Footprint declared by the enclosing transaction.
    pub declared_footprint: LedgerFootprint,
}

/// A classified operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOperation {
    /// Upload contract code.
    InstallContractCode {
        invocation: HostInvocation,
        code: BytesM,
    },
    /// Instantiate a contract.
    CreateContract {
        invocation: HostInvocation,
        preimage: ContractIdPreimage,
        executable: ContractExecutable,
    },
    /// Call a function on a deployed contract.
    InvokeContract {
        invocation: HostInvocation,
        args: InvokeContractArgs,
    },
    /// Any operation that is not a host-function invocation.
    Other {
        source_account: Option<AccountId>,
        name: &'static str,
    },
}

/// Discriminant of [`HostOperation`], cheap to copy into requests and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    InstallContractCode,
    CreateContract,
    InvokeContract,
    Other,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::InstallContractCode => "install_contract_code",
            OperationKind::CreateContract => "create_contract",
            OperationKind::InvokeContract => "invoke_contract",
            OperationKind::Other => "other",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HostOperation {
    /// Classifies `op`, attaching the transaction's declared footprint.
    pub fn classify(op: &Operation, declared_footprint: &LedgerFootprint) -> Self {
        let source_account = op
            .source_account
            .as_ref()
            .map(|muxed| muxed.clone().account_id());

        let OperationBody::InvokeHostFunction(host_op) = &op.body else {
            return HostOperation::Other {
                source_account,
                name: op.body.name(),
            };
        };

        let invocation = HostInvocation {
            source_account,
            op: host_op.clone(),
            declared_footprint: declared_footprint.clone(),
        };

        match &host_op.host_function {
            HostFunction::UploadContractWasm(code) => HostOperation::InstallContractCode {
                invocation,
                code: code.clone(),
            },
            HostFunction::CreateContract(args) => HostOperation::CreateContract {
                invocation,
                preimage: args.contract_id_preimage.clone(),
                executable: args.executable.clone(),
            },
            HostFunction::CreateContractV2(args) => HostOperation::CreateContract {
                invocation,
                preimage: args.contract_id_preimage.clone(),
                executable: args.executable.clone(),
            },
            HostFunction::InvokeContract(args) => HostOperation::InvokeContract {
                invocation,
                args: args.clone(),
            },
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            HostOperation::InstallContractCode { .. } => OperationKind::InstallContractCode,
            HostOperation::CreateContract { .. } => OperationKind::CreateContract,
            HostOperation::InvokeContract { .. } => OperationKind::InvokeContract,
            HostOperation::Other { .. } => OperationKind::Other,
        }
    }

    /// The invocation details, or `None` for [`HostOperation::Other`].
    pub fn invocation(&self) -> Option<&HostInvocation> {
        match self {
            HostOperation::InstallContractCode { invocation, .. }
            | HostOperation::CreateContract { invocation, .. }
            | HostOperation::InvokeContract { invocation, .. } => Some(invocation),
            HostOperation::Other { .. } => None,
        }
    }

    /// The per-operation source override, if any.
    pub fn source_account(&self) -> Option<&AccountId> {
        match self {
            HostOperation::Other { source_account, .. } => source_account.as_ref(),
            _ => self
                .invocation()
                .and_then(|invocation| invocation.source_account.as_ref()),
        }
    }

    /// A human-readable operation name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            HostOperation::Other { name, .. } => *name,
            _ => self.kind().as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{
        BumpSequenceOp, ContractIdPreimageFromAddress, CreateContractArgsV2, Hash, MuxedAccount,
        ScAddress, SequenceNumber, Uint256, VecM,
    };

    fn host_op(host_function: HostFunction, source: Option<MuxedAccount>) -> Operation {
        Operation {
            source_account: source,
            body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
                host_function,
                auth: VecM::default(),
            }),
        }
    }

    #[test]
    fn test_classify_upload() {
        let code: BytesM = b"a contract".to_vec().try_into().unwrap();
        let op = host_op(HostFunction::UploadContractWasm(code.clone()), None);
        let classified = HostOperation::classify(&op, &LedgerFootprint::default());
        assert_eq!(classified.kind(), OperationKind::InstallContractCode);
        assert!(matches!(
            classified,
            HostOperation::InstallContractCode { code: c, .. } if c == code
        ));
    }

    #[test]
    fn test_classify_create_v2_is_create() {
        let args = CreateContractArgsV2 {
            contract_id_preimage: ContractIdPreimage::Address(ContractIdPreimageFromAddress {
                address: ScAddress::Contract(Hash([1u8; 32]).into()),
                salt: Uint256([2u8; 32]),
            }),
            executable: ContractExecutable::Wasm(Hash([3u8; 32])),
            constructor_args: VecM::default(),
        };
        let op = host_op(HostFunction::CreateContractV2(args), None);
        let classified = HostOperation::classify(&op, &LedgerFootprint::default());
        assert_eq!(classified.kind(), OperationKind::CreateContract);
    }

    #[test]
    fn test_classify_other_keeps_source_and_name() {
        let op = Operation {
            source_account: Some(MuxedAccount::Ed25519(Uint256([8u8; 32]))),
            body: OperationBody::BumpSequence(BumpSequenceOp {
                bump_to: SequenceNumber(5),
            }),
        };
        let classified = HostOperation::classify(&op, &LedgerFootprint::default());
        assert_eq!(classified.kind(), OperationKind::Other);
        assert_eq!(classified.name(), "BumpSequence");
        assert!(classified.invocation().is_none());
        assert!(classified.source_account().is_some());
    }
}
