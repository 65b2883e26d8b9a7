//! Telegram Bot API client
//!
//! Wraps the single `sendDocument` call the relay needs. One call per
//! request, no retries.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::errors::RelayError;

pub const REPORT_CAPTION: &str = "Here is your 30-Day AstroTracker Report!";
pub const REPORT_FILENAME: &str = "AstroTracker-Report.pdf";
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";

/// Used when Telegram rejects the upload without a `description`.
pub const SEND_FAILED_FALLBACK: &str = "Failed to send PDF to Telegram.";

/// Envelope of every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramApiResponse {
    pub ok: bool,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// A document to attach to a `sendDocument` call.
#[derive(Debug, Clone)]
pub struct DocumentAttachment {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl DocumentAttachment {
    /// The decoded report, labelled as a PDF regardless of its content.
    #[must_use]
    pub fn report(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            filename: REPORT_FILENAME.to_string(),
            content_type: REPORT_CONTENT_TYPE.to_string(),
        }
    }
}

/// Build the multipart body for `sendDocument`.
///
/// # Errors
///
/// Returns an error if the attachment's content type is not a valid MIME type.
pub fn build_send_document_form(
    chat_id: &str,
    caption: &str,
    document: DocumentAttachment,
) -> Result<Form, RelayError> {
    let part = Part::bytes(document.bytes)
        .file_name(document.filename)
        .mime_str(&document.content_type)?;

    Ok(Form::new()
        .text("chat_id", chat_id.to_string())
        .text("caption", caption.to_string())
        .part("document", part))
}

/// Bot API client bound to one token.
pub struct TelegramClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl TelegramClient {
    #[must_use]
    pub fn new(http: Client, base_url: Url, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    /// `<base>/bot<token>/<method>`. Never log the result.
    fn method_url(&self, method: &str) -> Result<Url, RelayError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/bot{}/{}", base, self.token, method))?)
    }

    /// Upload a document to `chat_id`.
    ///
    /// # Errors
    ///
    /// - `RelayError::Http` on transport failure
    /// - `RelayError::UpstreamParse` if Telegram answers with something other than JSON
    /// - `RelayError::Upstream` if Telegram reports a failure
    pub async fn send_document(
        &self,
        chat_id: &str,
        caption: &str,
        document: DocumentAttachment,
    ) -> Result<TelegramApiResponse, RelayError> {
        let url = self.method_url("sendDocument")?;
        let size = document.bytes.len();
        let form = build_send_document_form(chat_id, caption, document)?;

        debug!(chat_id = %chat_id, bytes = size, "Sending document to Telegram");

        let resp = self.http.post(url).multipart(form).send().await?;
        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| RelayError::UpstreamParse(e.without_url().to_string()))?;

        interpret_response(status, body)
    }
}

fn interpret_response(
    status: reqwest::StatusCode,
    body: Value,
) -> Result<TelegramApiResponse, RelayError> {
    let parsed: Option<TelegramApiResponse> = serde_json::from_value(body.clone()).ok();

    match parsed {
        Some(api) if status.is_success() && api.ok => Ok(api),
        other => {
            error!(status = %status, response = %body, "Telegram API error");
            let description = other
                .and_then(|api| api.description)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| SEND_FAILED_FALLBACK.to_string());
            Err(RelayError::Upstream(description))
        }
    }
}
