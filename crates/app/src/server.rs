//! JSON-RPC HTTP server.
//!
//! | Route | Method | Purpose |
//! |-------|--------|---------|
//! | `/` | POST | JSON-RPC 2.0 endpoint |
//! | `/health` | GET | Liveness probe |
//! | `/ll` | GET, POST | Read or change log levels |

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use soroban_rpc_common::NetworkId;
use soroban_rpc_core_client::SimulationBackend;
use tokio::net::TcpListener;

use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse, RpcError};
use crate::logging::{LogLevelHandle, LOG_PARTITIONS};
use crate::methods;

/// Shared state handed to every request.
pub struct ServerState {
    pub network_passphrase: String,
    pub network_id: NetworkId,
    pub backend: Arc<dyn SimulationBackend>,
    /// Deadline for one backend simulation.
    pub core_timeout: Duration,
    pub log_handle: Option<LogLevelHandle>,
}

impl ServerState {
    pub fn new(
        network_passphrase: impl Into<String>,
        backend: Arc<dyn SimulationBackend>,
        core_timeout: Duration,
    ) -> Self {
        let network_passphrase = network_passphrase.into();
        Self {
            network_id: NetworkId::from_passphrase(&network_passphrase),
            network_passphrase,
            backend,
            core_timeout,
            log_handle: None,
        }
    }

    pub fn with_log_handle(mut self, log_handle: LogLevelHandle) -> Self {
        self.log_handle = Some(log_handle);
        self
    }
}

/// The gateway's HTTP front end.
pub struct RpcServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
}

impl RpcServer {
    pub fn new(addr: SocketAddr, state: ServerState) -> Self {
        Self {
            addr,
            state: Arc::new(state),
        }
    }

    pub fn router(state: Arc<ServerState>) -> Router {
        Router::new()
            .route("/", post(rpc_handler))
            .route("/health", get(health_handler))
            .route("/ll", get(ll_handler).post(ll_handler))
            .with_state(state)
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn start<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!(addr = %self.addr, "Starting JSON-RPC server");
        Self::serve(listener, self.state, shutdown).await
    }

    /// Serves on an already bound listener.
    pub async fn serve<F>(
        listener: TcpListener,
        state: Arc<ServerState>,
        shutdown: F,
    ) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, Self::router(state))
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("JSON-RPC server stopped");
        Ok(())
    }
}

async fn rpc_handler(State(state): State<Arc<ServerState>>, body: Bytes) -> Json<JsonRpcResponse> {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => return Json(JsonRpcResponse::failure(Value::Null, RpcError::parse_error(e))),
    };
    if value.is_array() {
        return Json(JsonRpcResponse::failure(
            Value::Null,
            RpcError::invalid_request("batch requests are not supported"),
        ));
    }

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => return Json(JsonRpcResponse::failure(id, RpcError::invalid_request(e))),
    };
    if let Some(version) = request.jsonrpc.as_deref() {
        if version != crate::jsonrpc::JSONRPC_VERSION {
            return Json(JsonRpcResponse::failure(
                id,
                RpcError::invalid_request(format!("unsupported jsonrpc version {version}")),
            ));
        }
    }

    let response = match methods::dispatch(&state, request).await {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(error) => {
            tracing::debug!(code = error.code, message = %error.message, "RPC request failed");
            JsonRpcResponse::failure(id, error)
        }
    };
    Json(response)
}

async fn health_handler() -> impl IntoResponse {
    Json(methods::health::handle())
}

/// Query parameters for /ll.
#[derive(Deserialize)]
struct LlParams {
    level: Option<String>,
    partition: Option<String>,
}

#[derive(Serialize)]
struct LlResponse {
    levels: HashMap<String, String>,
}

/// GET /ll returns current levels; POST /ll?level=DEBUG[&partition=Core]
/// changes them.
async fn ll_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<LlParams>,
) -> impl IntoResponse {
    let Some(log_handle) = &state.log_handle else {
        let mut levels: HashMap<String, String> = LOG_PARTITIONS
            .iter()
            .map(|(partition, _)| (partition.to_string(), "info".to_string()))
            .collect();
        levels.insert("Global".to_string(), "info".to_string());
        if params.level.is_some() {
            levels.insert(
                "warning".to_string(),
                "Logging initialized without dynamic level support".to_string(),
            );
        }
        return (StatusCode::OK, Json(LlResponse { levels }));
    };

    let Some(level) = &params.level else {
        return (
            StatusCode::OK,
            Json(LlResponse {
                levels: log_handle.get_levels(),
            }),
        );
    };

    let result = match &params.partition {
        Some(partition) => log_handle.set_partition_level(partition, level),
        None => log_handle.set_level(level),
    };
    match result {
        Ok(()) => {
            tracing::info!(level = %level, partition = ?params.partition, "Log level updated");
            (
                StatusCode::OK,
                Json(LlResponse {
                    levels: log_handle.get_levels(),
                }),
            )
        }
        Err(e) => {
            let levels = HashMap::from([("error".to_string(), e.to_string())]);
            (StatusCode::BAD_REQUEST, Json(LlResponse { levels }))
        }
    }
}
