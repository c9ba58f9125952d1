//! The simulation backend seam and its HTTP implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use soroban_rpc_tx::SimulationRequest;
use stellar_xdr::curr::LedgerFootprint;
use tracing::{debug, warn};
use url::Url;

use crate::error::BackendError;
use crate::wire::{PreflightRequest, PreflightResponse, PREFLIGHT_PATH};

/// A successful simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// Footprint the invocation actually touched.
    pub footprint: LedgerFootprint,
    pub cpu_instructions: u64,
    pub memory_bytes: u64,
    /// Values returned by the invocation, as core encoded them (base64).
    ///
    /// These are passed to the caller untouched; core may speak an older
    /// XDR revision than this crate.
    pub results: Vec<String>,
    /// Latest ledger the simulation ran against.
    pub latest_ledger: i64,
}

/// What the backend reported for one simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationOutcome {
    Success(SimulationResult),
    /// The invocation ran and failed; `error` is the backend's own text.
    ExecutionFailed { error: String, latest_ledger: i64 },
}

/// An execution backend able to simulate a prepared request.
#[async_trait]
pub trait SimulationBackend: Send + Sync {
    /// Simulates `request`, giving up once `deadline` has elapsed.
    ///
    /// Implementations make exactly one attempt.
    async fn simulate(
        &self,
        request: &SimulationRequest,
        deadline: Duration,
    ) -> Result<SimulationOutcome, BackendError>;
}

/// HTTP client for core's preflight endpoint.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CoreClient {
    client: Client,
    endpoint: Url,
}

impl CoreClient {
    /// Creates a client for the core instance at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let client = Client::builder().build().map_err(BackendError::Client)?;
        Self::with_client(client, base_url)
    }

    /// Creates a client that reuses an existing connection pool.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BackendError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(PREFLIGHT_PATH)?;
        Ok(Self { client, endpoint })
    }

    /// The full preflight URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn exchange(
        &self,
        body: &PreflightRequest,
        deadline: Duration,
    ) -> Result<SimulationOutcome, BackendError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(deadline)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(e, deadline))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::InvalidResponse(format!(
                "HTTP status {}",
                status.as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::from_reqwest(e, deadline))?;
        let parsed: PreflightResponse = serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        parsed.into_outcome()
    }
}

#[async_trait]
impl SimulationBackend for CoreClient {
    async fn simulate(
        &self,
        request: &SimulationRequest,
        deadline: Duration,
    ) -> Result<SimulationOutcome, BackendError> {
        let body = PreflightRequest::from_request(request)?;
        let started = Instant::now();

        let result = match tokio::time::timeout(deadline, self.exchange(&body, deadline)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout { deadline }),
        };

        match &result {
            Ok(SimulationOutcome::Success(sim)) => debug!(
                endpoint = %self.endpoint,
                elapsed_ms = started.elapsed().as_millis() as u64,
                cpu_insns = sim.cpu_instructions,
                mem_bytes = sim.memory_bytes,
                ledger = sim.latest_ledger,
                "Simulation succeeded"
            ),
            Ok(SimulationOutcome::ExecutionFailed { error, .. }) => debug!(
                endpoint = %self.endpoint,
                error = %error,
                "Simulation failed in core"
            ),
            Err(err) => warn!(
                endpoint = %self.endpoint,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %err,
                "Simulation request to core failed"
            ),
        }
        result
    }
}
