//! simulateTransaction end to end: envelope in, client response out, with a
//! deterministic in-process backend.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use parking_lot::Mutex;
use soroban_rpc_app::methods::simulate_transaction::{
    CORE_SUBMIT_ERROR, NO_INVOCATION_ERROR, TOO_MANY_OPERATIONS_ERROR, UNMARSHAL_ERROR,
};
use soroban_rpc_app::{simulate, ServerState, SimulateTransactionRequest, SimulateTransactionResponse};
use soroban_rpc_common::{xdr, Hash256, NetworkId};
use soroban_rpc_core_client::{BackendError, SimulationBackend, SimulationOutcome, SimulationResult};
use soroban_rpc_crypto::SecretKey;
use soroban_rpc_tx::builder::{
    build_install_contract_code_tx, create_contract_op, install_contract_code_op,
    invoke_contract_op, with_source, TransactionBuilder,
};
use soroban_rpc_tx::contract_id::contract_code_hash;
use soroban_rpc_tx::SimulationRequest;
use stellar_xdr::curr::{
    BumpSequenceOp, HostFunction, Operation, OperationBody, ScVal, SequenceNumber,
};

const STANDALONE: &str = "Standalone Network ; February 2017";
const INSTALL_FOOTPRINT: &str = "AAAAAAAAAAEAAAAH6p/Lga5Uop9rO/KThH0/1+mjaf0cgKyv7Gq9VxMX4MI=";
const INSTALL_RESULT: &str = "AAAABAAAAAEAAAAGAAAAIOqfy4GuVKKfazvyk4R9P9fpo2n9HICsr+xqvVcTF+DC";
const LATEST_LEDGER: i64 = 8;

/// A backend that "executes" host functions deterministically.
///
/// Uploads return the code hash as core reports it: a bytes object in the
/// older XDR layout. Invocations target a contract whose only function takes
/// two arguments. Creations return void.
#[derive(Default)]
struct FakeCore {
    delay: Option<Duration>,
    calls: Mutex<Vec<SimulationRequest>>,
}

impl FakeCore {
    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn execute(request: &SimulationRequest) -> SimulationOutcome {
        let results = match &request.op.host_function {
            HostFunction::UploadContractWasm(code) => {
                let hash = contract_code_hash(code).expect("hash");
                vec![legacy_bytes_object(&hash.0)]
            }
            HostFunction::InvokeContract(args) if args.args.len() != 2 => {
                return SimulationOutcome::ExecutionFailed {
                    error: "HostError: Error(Context, InvalidInput) InputArgsWrongLength"
                        .to_string(),
                    latest_ledger: LATEST_LEDGER,
                };
            }
            HostFunction::InvokeContract(_) => {
                vec![xdr::to_base64(&ScVal::I32(3)).expect("encode")]
            }
            _ => vec![xdr::to_base64(&ScVal::Void).expect("encode")],
        };
        SimulationOutcome::Success(SimulationResult {
            footprint: request.footprint.to_xdr().expect("footprint"),
            cpu_instructions: 1_000,
            memory_bytes: 2_048,
            results,
            latest_ledger: LATEST_LEDGER,
        })
    }
}

#[async_trait]
impl SimulationBackend for FakeCore {
    async fn simulate(
        &self,
        request: &SimulationRequest,
        deadline: Duration,
    ) -> Result<SimulationOutcome, BackendError> {
        self.calls.lock().push(request.clone());
        if let Some(delay) = self.delay {
            if tokio::time::timeout(deadline, tokio::time::sleep(delay))
                .await
                .is_err()
            {
                return Err(BackendError::Timeout { deadline });
            }
        }
        Ok(Self::execute(request))
    }
}

/// `ScVal::Object(Some(ScObject::Bytes(..)))` in the older XDR layout.
fn legacy_bytes_object(bytes: &[u8]) -> String {
    let mut encoded = vec![0, 0, 0, 4, 0, 0, 0, 1, 0, 0, 0, 6];
    encoded.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    encoded.extend_from_slice(bytes);
    STANDARD.encode(encoded)
}

fn state_with(core: Arc<FakeCore>, timeout: Duration) -> ServerState {
    ServerState::new(STANDALONE, core, timeout)
}

fn root() -> SecretKey {
    SecretKey::network_root(STANDALONE)
}

fn request_for(envelope: &stellar_xdr::curr::TransactionEnvelope) -> SimulateTransactionRequest {
    SimulateTransactionRequest {
        transaction: xdr::to_base64(envelope).expect("encode"),
    }
}

async fn run(core: &Arc<FakeCore>, request: &SimulateTransactionRequest) -> SimulateTransactionResponse {
    let state = state_with(core.clone(), Duration::from_secs(5));
    simulate(&state, request).await.expect("simulate")
}

#[tokio::test]
async fn install_returns_footprint_cost_and_code_hash() {
    let core = Arc::new(FakeCore::default());
    let (envelope, _) = build_install_contract_code_tx(
        b"a contract".to_vec(),
        1,
        100,
        &NetworkId::standalone(),
        &root(),
    )
    .expect("build");

    let response = run(&core, &request_for(&envelope)).await;

    assert_eq!(response.error, None);
    assert_eq!(response.footprint, INSTALL_FOOTPRINT);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].xdr, INSTALL_RESULT);
    assert!(response.cost.cpu_instructions > 0);
    assert!(response.cost.memory_bytes > 0);
    assert!(response.latest_ledger > 0);
    assert_eq!(core.call_count(), 1);
}

#[tokio::test]
async fn multiple_operations_are_rejected_before_the_backend() {
    let core = Arc::new(FakeCore::default());
    let key = root();
    let (first, _) = install_contract_code_op(b"one".to_vec()).expect("op");
    let (second, _) = install_contract_code_op(b"two".to_vec()).expect("op");
    let envelope = TransactionBuilder::new(&key.public_key(), 1)
        .operation(first)
        .operation(second)
        .sign(&key, &NetworkId::standalone())
        .expect("sign");

    let response = run(&core, &request_for(&envelope)).await;

    assert_eq!(response, SimulateTransactionResponse::failed(TOO_MANY_OPERATIONS_ERROR));
    assert_eq!(core.call_count(), 0);
}

#[tokio::test]
async fn non_invocation_operation_is_rejected() {
    let core = Arc::new(FakeCore::default());
    let key = root();
    let envelope = TransactionBuilder::new(&key.public_key(), 1)
        .operation(Operation {
            source_account: None,
            body: OperationBody::BumpSequence(BumpSequenceOp {
                bump_to: SequenceNumber(2),
            }),
        })
        .sign(&key, &NetworkId::standalone())
        .expect("sign");

    let response = run(&core, &request_for(&envelope)).await;

    assert_eq!(response, SimulateTransactionResponse::failed(NO_INVOCATION_ERROR));
    assert_eq!(core.call_count(), 0);
}

#[tokio::test]
async fn undecodable_transaction_is_rejected() {
    let core = Arc::new(FakeCore::default());
    for transaction in ["", "invalid", "AAAA", "!!!!"] {
        let response = run(
            &core,
            &SimulateTransactionRequest {
                transaction: transaction.to_string(),
            },
        )
        .await;
        assert_eq!(
            response,
            SimulateTransactionResponse::failed(UNMARSHAL_ERROR),
            "input {transaction:?}"
        );
    }
    assert_eq!(core.call_count(), 0);
}

#[tokio::test]
async fn backend_timeout_maps_to_submit_error() {
    let core = Arc::new(FakeCore::slow(Duration::from_secs(30)));
    let state = state_with(core.clone(), Duration::from_millis(50));
    let (envelope, _) = build_install_contract_code_tx(
        b"a contract".to_vec(),
        1,
        100,
        &NetworkId::standalone(),
        &root(),
    )
    .expect("build");

    let started = Instant::now();
    let response = simulate(&state, &request_for(&envelope))
        .await
        .expect("simulate");

    assert_eq!(response, SimulateTransactionResponse::failed(CORE_SUBMIT_ERROR));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(core.call_count(), 1);
}

#[tokio::test]
async fn execution_error_keeps_latest_ledger() {
    let core = Arc::new(FakeCore::default());
    let key = root();
    let op = invoke_contract_op(Hash256([9u8; 32]), "add", vec![ScVal::I32(1)]).expect("op");
    let envelope = TransactionBuilder::new(&key.public_key(), 1)
        .operation(op)
        .sign(&key, &NetworkId::standalone())
        .expect("sign");

    let response = run(&core, &request_for(&envelope)).await;

    assert!(response.results.is_empty());
    assert!(response.latest_ledger > 0);
    let error = response.error.expect("error");
    assert!(error.contains("InputArgsWrongLength"), "{error}");
}

#[tokio::test]
async fn invoking_without_arguments_reports_wrong_length() {
    let core = Arc::new(FakeCore::default());
    let key = root();
    let op = invoke_contract_op(Hash256([9u8; 32]), "add", vec![]).expect("op");
    let envelope = TransactionBuilder::new(&key.public_key(), 1)
        .operation(op)
        .sign(&key, &NetworkId::standalone())
        .expect("sign");

    let response = run(&core, &request_for(&envelope)).await;

    assert!(response.results.is_empty());
    assert!(response.latest_ledger > 0);
    assert!(response.footprint.is_empty());
    let error = response.error.expect("error");
    assert!(error.contains("InputArgsWrongLength"), "{error}");
    assert_eq!(core.call_count(), 1);
}

#[tokio::test]
async fn matching_arguments_succeed() {
    let core = Arc::new(FakeCore::default());
    let key = root();
    let op = invoke_contract_op(
        Hash256([9u8; 32]),
        "add",
        vec![ScVal::I32(1), ScVal::I32(2)],
    )
    .expect("op");
    let envelope = TransactionBuilder::new(&key.public_key(), 1)
        .operation(op)
        .sign(&key, &NetworkId::standalone())
        .expect("sign");

    let response = run(&core, &request_for(&envelope)).await;

    assert_eq!(response.error, None);
    assert_eq!(response.results[0].xdr, xdr::to_base64(&ScVal::I32(3)).expect("encode"));
}

#[tokio::test]
async fn operation_source_override_gives_the_same_response() {
    let network = NetworkId::standalone();
    let envelope_key = SecretKey::from_seed(&[1u8; 32]);
    let deployer = root();
    let deployer_id: stellar_xdr::curr::AccountId = (&deployer.public_key()).into();
    let op = create_contract_op(&deployer_id, [3u8; 32], Hash256([4u8; 32]));

    let overridden = TransactionBuilder::new(&envelope_key.public_key(), 1)
        .operation(with_source(op.clone(), &deployer.public_key()))
        .sign(&envelope_key, &network)
        .expect("sign");
    let direct = TransactionBuilder::new(&deployer.public_key(), 1)
        .operation(op)
        .sign(&deployer, &network)
        .expect("sign");

    let core = Arc::new(FakeCore::default());
    let overridden = run(&core, &request_for(&overridden)).await;
    let direct = run(&core, &request_for(&direct)).await;

    assert_eq!(overridden.error, None);
    assert_eq!(overridden.footprint, direct.footprint);
    assert_eq!(overridden.results, direct.results);
    assert_eq!(overridden.cost, direct.cost);

    let calls = core.calls.lock();
    assert_eq!(calls[0].source_account, calls[1].source_account);
}
