//! JSON-RPC 2.0 envelopes and error objects.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;
const PARSE_ERROR: i32 = -32700;

pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("RPC error {code}: {message}")]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn parse_error<E: Display>(error: E) -> Self {
        Self {
            code: PARSE_ERROR,
            message: format!("error parsing request body: {error}"),
        }
    }

    pub fn invalid_request<E: Display>(error: E) -> Self {
        Self {
            code: INVALID_REQUEST,
            message: format!("invalid request: {error}"),
        }
    }

    pub fn method_not_found<M: Display>(method: M) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("method not found: {method}"),
        }
    }

    pub fn invalid_params<E: Display>(error: E) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: format!("invalid request params: {error}"),
        }
    }

    pub fn internal<E: Display>(error: E) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: format!("internal server error: {error}"),
        }
    }
}

/// Methods served by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RpcMethod {
    SimulateTransaction,
    GetHealth,
    GetNetwork,
}

impl RpcMethod {
    /// Looks up a method by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(Value::String(name.to_string())).ok()
    }
}

impl Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// An incoming request. The method stays a string so unknown names can be
/// reported with `-32601` rather than as a malformed request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// An outgoing response: exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Extracts a method's parameter object.
///
/// Accepts the object itself or a one-element positional array holding it.
pub fn parse_params<T: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<T, RpcError> {
    let value = match params {
        Some(Value::Array(mut items)) if items.len() == 1 => items.remove(0),
        Some(Value::Array(items)) => {
            return Err(RpcError::invalid_params(format!(
                "expected 1 positional parameter, got {}",
                items.len()
            )))
        }
        Some(value) => value,
        None => return Err(RpcError::invalid_params("missing params")),
    };
    serde_json::from_value(value).map_err(RpcError::invalid_params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Params {
        transaction: String,
    }

    #[test]
    fn test_method_names() {
        assert_eq!(
            RpcMethod::from_name("simulateTransaction"),
            Some(RpcMethod::SimulateTransaction)
        );
        assert_eq!(RpcMethod::from_name("getHealth"), Some(RpcMethod::GetHealth));
        assert_eq!(RpcMethod::from_name("getNetwork"), Some(RpcMethod::GetNetwork));
        assert_eq!(RpcMethod::from_name("sendTransaction"), None);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RpcError::parse_error("x").code, -32700);
        assert_eq!(RpcError::invalid_request("x").code, -32600);
        assert_eq!(RpcError::method_not_found("x").code, -32601);
        assert_eq!(RpcError::invalid_params("x").code, -32602);
        assert_eq!(RpcError::internal("x").code, -32603);
    }

    #[test]
    fn test_parse_params_shapes() {
        let expected = Params {
            transaction: "AAAA".to_string(),
        };
        let by_name: Params = parse_params(Some(json!({"transaction": "AAAA"}))).unwrap();
        assert_eq!(by_name, expected);
        let positional: Params = parse_params(Some(json!([{"transaction": "AAAA"}]))).unwrap();
        assert_eq!(positional, expected);

        let err = parse_params::<Params>(None).unwrap_err();
        assert_eq!(err.code, -32602);
        let err = parse_params::<Params>(Some(json!([1, 2]))).unwrap_err();
        assert_eq!(err.code, -32602);
        let err = parse_params::<Params>(Some(json!({"tx": "AAAA"}))).unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn test_response_shape() {
        let ok = serde_json::to_value(JsonRpcResponse::success(json!(1), json!({"a": 1}))).unwrap();
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": {"a": 1}}));

        let err = serde_json::to_value(JsonRpcResponse::failure(
            Value::Null,
            RpcError::method_not_found("nope"),
        ))
        .unwrap();
        assert_eq!(err["error"]["code"], -32601);
        assert!(err.get("result").is_none());
    }
}
