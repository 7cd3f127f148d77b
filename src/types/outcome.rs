use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed-shape result envelope produced by every data operation.
///
/// Every data route echoes this verbatim as its JSON body, so clients can
/// parse responses generically. The field set is the whole contract: exactly
/// `operation`, `success`, `code`, `message`, `results`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outcome {
    /// Name of the attempted action, e.g. `"build"` or `"adduser"`.
    pub operation: String,
    pub success: bool,
    /// 0 on success; the driver-reported error code on a caught failure.
    pub code: i64,
    pub message: String,
    /// Operation-dependent payload; null when the operation has none.
    pub results: Value,
}

impl Outcome {
    pub fn ok(operation: impl Into<String>, message: impl Into<String>, results: Value) -> Self {
        Self {
            operation: operation.into(),
            success: true,
            code: 0,
            message: message.into(),
            results,
        }
    }

    pub fn failed(operation: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            success: false,
            code,
            message: message.into(),
            results: Value::Null,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}
