use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::RelayError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// True when the payload looks like an API Gateway proxy event rather than a
/// direct `aws lambda invoke` with the request object itself.
pub fn is_proxy_event(payload: &Value) -> bool {
    payload.get("requestContext").is_some()
        || payload.get("httpMethod").is_some()
        || payload.get("body").is_some()
}

/// HTTP method of a proxy event (REST v1 `httpMethod`, HTTP API v2
/// `requestContext.http.method`). `None` for direct invocations.
pub fn http_method(payload: &Value) -> Option<&str> {
    payload
        .get("httpMethod")
        .and_then(|v| v.as_str())
        .or_else(|| v_str(payload, &["requestContext", "http", "method"]))
}

/// # Errors
///
/// Returns `RelayError::MethodNotAllowed` if the method is known and not POST.
pub fn ensure_post(payload: &Value) -> Result<(), RelayError> {
    match http_method(payload) {
        Some(m) if !m.eq_ignore_ascii_case("POST") => {
            Err(RelayError::MethodNotAllowed(m.to_string()))
        }
        _ => Ok(()),
    }
}

/// Returns the raw JSON request body.
///
/// Proxy events carry it as a string, possibly base64-encoded by the
/// gateway. A direct invocation is its own body.
///
/// # Errors
///
/// Returns `RelayError::InvalidRequest` if the body is absent, not a string,
/// or flagged as base64 but not decodable to UTF-8 text.
pub fn extract_body(payload: &Value) -> Result<String, RelayError> {
    if !is_proxy_event(payload) {
        return Ok(payload.to_string());
    }

    let Some(body) = payload.get("body").filter(|b| !b.is_null()) else {
        return Err(RelayError::InvalidRequest("Missing body".to_string()));
    };

    let Some(body_str) = body.as_str() else {
        return Err(RelayError::InvalidRequest("Invalid body format".to_string()));
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !encoded {
        return Ok(body_str.to_string());
    }

    let bytes = STANDARD
        .decode(body_str)
        .map_err(|e| RelayError::InvalidRequest(format!("Invalid body encoding: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| RelayError::InvalidRequest(format!("Invalid body encoding: {}", e)))
}
