//! The Soroban RPC simulation gateway.
//!
//! This crate wires the preparation pipeline from `soroban-rpc-tx` and the
//! backend client from `soroban-rpc-core-client` into a JSON-RPC 2.0 HTTP
//! service.
//!
//! # Modules
//!
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: tracing subscriber setup and runtime level changes
//! - [`jsonrpc`]: request/response envelopes and error codes
//! - [`methods`]: `simulateTransaction`, `getHealth`, `getNetwork`
//! - [`server`]: the axum router and server lifecycle
//! - [`run_cmd`]: the `run` command entry point
//!
//! # Example
//!
//! ```no_run
//! use soroban_rpc_app::config::AppConfig;
//! use soroban_rpc_app::run_cmd::run_server;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::standalone();
//! run_server(config, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod jsonrpc;
pub mod logging;
pub mod methods;
pub mod run_cmd;
pub mod server;

pub use config::AppConfig;
pub use jsonrpc::{JsonRpcRequest, JsonRpcResponse, RpcError, RpcMethod};
pub use methods::simulate_transaction::{
    assemble, simulate, SimulateTransactionRequest, SimulateTransactionResponse,
    SimulationFailure,
};
pub use server::{RpcServer, ServerState};
