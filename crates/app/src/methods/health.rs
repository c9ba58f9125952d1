//! The `getHealth` method.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Reports that the gateway is serving requests. Backend reachability is
/// not probed.
pub fn handle() -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health() {
        assert_eq!(
            serde_json::to_value(handle()).unwrap(),
            serde_json::json!({"status": "healthy"})
        );
    }
}
