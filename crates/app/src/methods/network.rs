//! The `getNetwork` method.

use serde::{Deserialize, Serialize};

use crate::server::ServerState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResponse {
    pub passphrase: String,
    /// Hex SHA-256 of the passphrase.
    pub network_id: String,
}

pub fn handle(state: &ServerState) -> NetworkResponse {
    NetworkResponse {
        passphrase: state.network_passphrase.clone(),
        network_id: state.network_id.0.to_hex(),
    }
}
