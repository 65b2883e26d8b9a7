//! Response builders for API Gateway proxy responses.

use serde_json::{Value, json};

use crate::core::models::RelayResponse;
use crate::errors::RelayError;

pub const CONFIG_ERROR_MESSAGE: &str = "Server configuration error.";

/// Wraps a `RelayResponse` in the `{statusCode, headers, body}` envelope.
#[must_use]
pub fn json_response(status_code: u16, body: &RelayResponse) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string())
    })
}

/// 200 `{"success":true}`.
#[must_use]
pub fn ok_success() -> Value {
    json_response(200, &RelayResponse::success())
}

/// `{"success":false,"message":...}` with the given status.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &RelayResponse::failure(message))
}

/// 405 with an `Allow` header.
#[must_use]
pub fn method_not_allowed() -> Value {
    let mut resp = err_response(405, "Method Not Allowed");
    resp["headers"]["Allow"] = Value::String("POST".to_string());
    resp
}

/// Maps a failed relay to the response the caller sees.
///
/// Configuration problems get a generic message so nothing about the
/// deployment leaks; relay failures carry their own message without a
/// `success` flag.
#[must_use]
pub fn error_to_response(err: &RelayError) -> Value {
    match err {
        RelayError::MissingConfig(_) => err_response(500, CONFIG_ERROR_MESSAGE),
        RelayError::MethodNotAllowed(_) => method_not_allowed(),
        RelayError::InvalidRequest(msg) => err_response(400, msg),
        RelayError::Decode(_)
        | RelayError::Http(_)
        | RelayError::UpstreamParse(_)
        | RelayError::Upstream(_) => json_response(
            err.status_code(),
            &RelayResponse::message_only(err.to_string()),
        ),
    }
}
