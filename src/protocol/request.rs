//! Request and Response message types.
//!
//! One JSON object per line in each direction.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

// ============================================================================
// Request
// ============================================================================

/// An inbound call.
///
/// # Format
///
/// ```json
/// { "id": 1, "method": "close_tab_by_id", "params": { "tabId": 555 } }
/// ```
///
/// `id` is opaque and echoed back unchanged. `params` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Caller's correlation id, any JSON value.
    #[serde(default)]
    pub id: Value,

    /// Operation name, e.g. `get_tabs`.
    pub method: String,

    /// Operation arguments.
    #[serde(default)]
    pub params: Value,
}

impl Request {
    /// Creates a request.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// An outbound result.
///
/// # Format
///
/// Success:
/// ```json
/// { "id": 1, "type": "success", "result": { ... } }
/// ```
///
/// Error:
/// ```json
/// { "id": 1, "type": "error", "error": "not_found", "message": "Tab not found: 999" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Echo of the request id (`null` if the request could not be read).
    pub id: Value,

    /// Response type.
    #[serde(rename = "type")]
    pub response_type: ResponseType,

    /// Result data (if success).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error code (if error).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error message (if error).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    /// Creates a success response.
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            response_type: ResponseType::Success,
            result: Some(result),
            error: None,
            message: None,
        }
    }

    /// Creates an error response from a crate error.
    #[must_use]
    pub fn failure(id: Value, err: &Error) -> Self {
        Self {
            id,
            response_type: ResponseType::Error,
            result: None,
            error: Some(err.kind().to_string()),
            message: Some(err.to_string()),
        }
    }

    /// Returns `true` if this is a success response.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response_type == ResponseType::Success
    }

    /// Returns `true` if this is an error response.
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.response_type == ResponseType::Error
    }

    /// Returns the result text field, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|v| v.get("text"))
            .and_then(Value::as_str)
    }
}

// ============================================================================
// ResponseType
// ============================================================================

/// Response outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// The operation completed.
    Success,
    /// The operation failed; see `error` and `message`.
    Error,
}

// ============================================================================
// Tests
// ============================================================================
