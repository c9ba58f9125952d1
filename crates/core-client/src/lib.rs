//! Client for the stellar-core simulation backend.
//!
//! The gateway does not execute contracts itself. A prepared
//! [`SimulationRequest`](soroban_rpc_tx::SimulationRequest) is sent to core's
//! preflight endpoint, which runs the invocation against current ledger
//! state and reports the footprint it touched, the resources it used and
//! the value it returned.
//!
//! The [`SimulationBackend`] trait is the seam: [`CoreClient`] talks HTTP to
//! a real core, tests substitute deterministic fakes.
//!
//! # Outcomes
//!
//! | Backend behaviour | Result |
//! |-------------------|--------|
//! | `status: "OK"` | `Ok(SimulationOutcome::Success(..))` |
//! | `status: "ERROR"` | `Ok(SimulationOutcome::ExecutionFailed { .. })` |
//! | no answer within the deadline | `Err(BackendError::Timeout { .. })` |
//! | connection refused / reset | `Err(BackendError::Unreachable(..))` |
//! | bad status or body | `Err(BackendError::InvalidResponse(..))` |
//!
//! Each call makes exactly one attempt.

mod client;
mod error;
pub mod wire;

pub use client::{CoreClient, SimulationBackend, SimulationOutcome, SimulationResult};
pub use error::BackendError;
