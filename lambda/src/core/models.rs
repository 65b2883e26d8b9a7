use serde::{Deserialize, Serialize};

use crate::errors::RelayError;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing PDF data or user ID.";

/// Telegram chat ids are numeric, and browsers happily send them as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipientId {
    Text(String),
    Number(i64),
}

impl RecipientId {
    #[must_use]
    pub fn into_chat_id(self) -> String {
        match self {
            RecipientId::Text(s) => s,
            RecipientId::Number(n) => n.to_string(),
        }
    }
}

/// Inbound body of `POST /api/send-pdf`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPdfRequest {
    pub pdf_base64: Option<String>,
    pub user_id: Option<RecipientId>,
}

/// A request with both fields present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTask {
    pub pdf_base64: String,
    pub chat_id: String,
}

impl SendPdfRequest {
    /// # Errors
    ///
    /// Returns `RelayError::InvalidRequest` if the body is not JSON or does not
    /// have the expected shape.
    pub fn from_json(body: &str) -> Result<Self, RelayError> {
        serde_json::from_str(body)
            .map_err(|e| RelayError::InvalidRequest(format!("Invalid JSON body: {}", e)))
    }

    /// # Errors
    ///
    /// Returns `RelayError::InvalidRequest` if either field is absent or empty.
    pub fn validate(self) -> Result<RelayTask, RelayError> {
        let pdf_base64 = self.pdf_base64.filter(|s| !s.is_empty());
        let chat_id = self
            .user_id
            .map(RecipientId::into_chat_id)
            .filter(|s| !s.is_empty());

        match (pdf_base64, chat_id) {
            (Some(pdf_base64), Some(chat_id)) => Ok(RelayTask {
                pdf_base64,
                chat_id,
            }),
            _ => Err(RelayError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

/// Body of every response this function returns.
///
/// Relay failures only carry `message`; everything else sets `success` too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RelayResponse {
    #[must_use]
    pub fn success() -> Self {
        Self {
            success: Some(true),
            message: None,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: None,
            message: Some(message.into()),
        }
    }
}
