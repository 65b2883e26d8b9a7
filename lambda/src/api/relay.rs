//! The relay itself: validated request in, one `sendDocument` call out.

use reqwest::Client as HttpClient;
use tracing::{error, info, warn};

use crate::core::config::AppConfig;
use crate::core::models::SendPdfRequest;
use crate::errors::RelayError;
use crate::telegram::{DocumentAttachment, REPORT_CAPTION, TelegramClient};
use crate::utils::pdf::{decode_pdf_base64, has_pdf_signature};

/// The configured bot token, or a logged `MissingConfig` error.
///
/// # Errors
///
/// Returns `RelayError::MissingConfig` when `BOT_TOKEN` is not set.
pub fn resolve_token<'a>(
    config: &'a AppConfig,
    correlation_id: &str,
) -> Result<&'a str, RelayError> {
    config.require_bot_token().inspect_err(|_| {
        error!(
            correlation_id = %correlation_id,
            "Environment variable 'BOT_TOKEN' is not set"
        );
    })
}

/// Relay one JSON request body to Telegram.
///
/// The token is checked before the body is even looked at, so a
/// misconfigured deployment answers 500 to every request.
///
/// # Errors
///
/// Returns the `RelayError` that ended the attempt; its `status_code()`
/// decides the HTTP status the caller sees.
pub async fn relay_pdf(
    config: &AppConfig,
    http: &HttpClient,
    body: &str,
    correlation_id: &str,
) -> Result<(), RelayError> {
    let token = resolve_token(config, correlation_id)?;

    let task = SendPdfRequest::from_json(body)?.validate()?;

    let pdf = decode_pdf_base64(&task.pdf_base64)?;
    if !has_pdf_signature(&pdf) {
        warn!(
            correlation_id = %correlation_id,
            bytes = pdf.len(),
            "Decoded document has no PDF signature; forwarding as-is"
        );
    }

    let telegram = TelegramClient::new(http.clone(), config.api_base_url.clone(), token);
    telegram
        .send_document(&task.chat_id, REPORT_CAPTION, DocumentAttachment::report(pdf))
        .await?;

    info!(
        correlation_id = %correlation_id,
        chat_id = %task.chat_id,
        "Report delivered to Telegram"
    );
    Ok(())
}
