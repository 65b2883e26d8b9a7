use thiserror::Error;

/// Everything that can end a relay attempt early.
///
/// Display strings are what callers see in the `message` field of the
/// response, so they must never contain the bot token.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed(String),

    #[error("Failed to decode PDF data: {0}")]
    Decode(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Failed to parse Telegram response: {0}")]
    UpstreamParse(String),

    /// Carries the upstream `description` verbatim.
    #[error("{0}")]
    Upstream(String),
}

impl RelayError {
    /// HTTP status code surfaced to the caller for this failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::InvalidRequest(_) => 400,
            RelayError::MethodNotAllowed(_) => 405,
            RelayError::MissingConfig(_)
            | RelayError::Decode(_)
            | RelayError::Http(_)
            | RelayError::UpstreamParse(_)
            | RelayError::Upstream(_) => 500,
        }
    }

    /// Whether the caller did something wrong, as opposed to us or Telegram.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

// reqwest renders the request URL into its errors, and the URL path embeds
// the bot token.
impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        RelayError::Http(error.without_url().to_string())
    }
}

impl From<base64::DecodeError> for RelayError {
    fn from(error: base64::DecodeError) -> Self {
        RelayError::Decode(error.to_string())
    }
}

impl From<url::ParseError> for RelayError {
    fn from(error: url::ParseError) -> Self {
        RelayError::Http(format!("Invalid Telegram API URL: {}", error))
    }
}
