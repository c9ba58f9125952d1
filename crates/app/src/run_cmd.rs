//! The `run` command: serve JSON-RPC against a configured core.

use std::sync::Arc;

use soroban_rpc_core_client::CoreClient;
use tokio::signal;

use crate::config::AppConfig;
use crate::logging::LogLevelHandle;
use crate::server::{RpcServer, ServerState};

/// Builds the server state for `config`, talking HTTP to core.
pub fn server_state(config: &AppConfig) -> anyhow::Result<ServerState> {
    let client = CoreClient::new(&config.core.url)?;
    Ok(ServerState::new(
        config.network.passphrase.clone(),
        Arc::new(client),
        config.core.timeout(),
    ))
}

/// Runs the gateway until Ctrl+C or SIGTERM.
pub async fn run_server(
    config: AppConfig,
    log_handle: Option<LogLevelHandle>,
) -> anyhow::Result<()> {
    config.validate()?;

    let mut state = server_state(&config)?;
    if let Some(handle) = log_handle {
        state = state.with_log_handle(handle);
    }

    tracing::info!(
        network = %config.network.passphrase,
        network_id = %state.network_id.0.to_hex(),
        core = %config.core.url,
        timeout_ms = config.core.timeout_ms,
        "Starting soroban-rpc"
    );

    RpcServer::new(config.http.socket_addr()?, state)
        .start(wait_for_shutdown_signal())
        .await
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM).
pub async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM");
        }
    }
}
