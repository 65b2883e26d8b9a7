//! API Lambda handler for `POST /api/send-pdf`.
//!
//! This module handles:
//! - Envelope unwrapping (method, body, gateway base64)
//! - The relay to Telegram (delegated to `relay`)
//! - Mapping every outcome to a proxy response; nothing escapes as a Lambda error

use lambda_runtime::{Error, LambdaEvent};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::{helpers, parsing, relay};
use crate::core::config::AppConfig;
use crate::errors::RelayError;

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never returns `Err` in practice: every failure is turned into a 4xx/5xx
/// proxy response. The `Result` is what `lambda_runtime` expects.
#[tracing::instrument(level = "info", skip(event, config), fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    event: LambdaEvent<Value>,
    config: &AppConfig,
) -> Result<Value, Error> {
    let correlation_id = Uuid::new_v4().to_string();
    let payload = event.payload;

    let trace_id = payload
        .get("headers")
        .and_then(|h| parsing::get_header_value(h, "X-Amzn-Trace-Id"))
        .unwrap_or("");
    info!(
        correlation_id = %correlation_id,
        xray_trace_id = %trace_id,
        method = parsing::http_method(&payload).unwrap_or("<direct>"),
        "Received send-pdf request"
    );

    // A fresh client per request; nothing is pooled across invocations.
    let http = HttpClient::new();

    match process(&payload, config, &http, &correlation_id).await {
        Ok(()) => Ok(helpers::ok_success()),
        Err(e) => {
            if e.is_client_error() {
                debug!(correlation_id = %correlation_id, "Rejected request: {}", e);
            } else {
                error!(correlation_id = %correlation_id, "API Error: {}", e);
            }
            Ok(helpers::error_to_response(&e))
        }
    }
}

async fn process(
    payload: &Value,
    config: &AppConfig,
    http: &HttpClient,
    correlation_id: &str,
) -> Result<(), RelayError> {
    parsing::ensure_post(payload)?;
    // The token check comes before body validation so that a broken
    // deployment is reported the same way for every request.
    relay::resolve_token(config, correlation_id)?;
    let body = parsing::extract_body(payload)?;
    relay::relay_pdf(config, http, &body, correlation_id).await
}
