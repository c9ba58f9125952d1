//! JSON-RPC method handlers.

pub mod health;
pub mod network;
pub mod simulate_transaction;

use serde_json::Value;
use tracing::debug;

use crate::jsonrpc::{JsonRpcRequest, RpcError, RpcMethod};
use crate::server::ServerState;

/// Routes a request to its handler.
pub async fn dispatch(state: &ServerState, request: JsonRpcRequest) -> Result<Value, RpcError> {
    let method = RpcMethod::from_name(&request.method)
        .ok_or_else(|| RpcError::method_not_found(&request.method))?;
    debug!(%method, "Dispatching RPC request");

    match method {
        RpcMethod::SimulateTransaction => simulate_transaction::handle(state, request.params).await,
        RpcMethod::GetHealth => to_value(health::handle()),
        RpcMethod::GetNetwork => to_value(network::handle(state)),
    }
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(RpcError::internal)
}
