//! Classification of backend responses into values or errors.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use notesgpt_core::error::{AppError, ErrorKind};
use notesgpt_core::result::AppResult;

/// Fallback message when neither the body nor the status carries one.
const GENERIC_FAILURE: &str = "Something went wrong";

/// Whether a `Content-Type` header value denotes JSON.
pub fn is_json_content_type(value: Option<&str>) -> bool {
    value.is_some_and(|ct| ct.contains("application/json"))
}

/// Parse a response body. Empty or non-JSON bodies become `Value::Null`.
pub fn parse_body(is_json: bool, text: &str) -> AppResult<Value> {
    if !is_json || text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Malformed response body: {e}"),
            e,
        )
    })
}

/// Derive the user-facing message for a failed response.
///
/// The backend reports errors as `{"error": "..."}` or, for validation
/// failures, as `{"error": {"field": "message"}}`.
pub fn error_message(body: &Value, status: StatusCode) -> String {
    match body.get("error") {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        Some(Value::Object(fields)) if !fields.is_empty() => {
            let mut pairs: Vec<String> = fields
                .iter()
                .map(|(field, value)| match value {
                    Value::String(s) => format!("{field}: {s}"),
                    other => format!("{field}: {other}"),
                })
                .collect();
            pairs.sort();
            pairs.join("; ")
        }
        _ => status
            .canonical_reason()
            .unwrap_or(GENERIC_FAILURE)
            .to_string(),
    }
}

/// Decode an envelope value into a typed DTO.
pub fn decode<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Unexpected response shape: {e}"),
            e,
        )
    })
}

/// Map a transport-level reqwest failure.
pub fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::with_source(ErrorKind::NetworkUnavailable, "Request timed out", err)
    } else if err.is_decode() {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to read response: {err}"),
            err,
        )
    } else if err.is_builder() {
        AppError::with_source(ErrorKind::Internal, format!("Invalid request: {err}"), err)
    } else {
        AppError::with_source(
            ErrorKind::NetworkUnavailable,
            format!("Backend unreachable: {err}"),
            err,
        )
    }
}
