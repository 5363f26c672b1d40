//! Standardized API response envelope: `{data, message}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope wrapping every API response.
///
/// Successful responses carry the payload in `data` and an empty `message`.
/// Failures carry an empty object in `data` and a human-readable `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            message: String::new(),
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// Failure envelope. `data` is always `{}`.
pub type ErrorResponse = ApiResponse<Value>;

impl ErrorResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: Value::Object(Map::new()),
            message: message.into(),
        }
    }
}
