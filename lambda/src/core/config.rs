use std::env;
use std::fmt;

use url::Url;

use crate::errors::RelayError;

pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
pub const API_BASE_URL_VAR: &str = "TELEGRAM_API_BASE_URL";
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Process configuration, read once at cold start.
///
/// A missing token is not a startup failure: every request re-checks it and
/// answers 500 until the deployment is fixed.
#[derive(Clone)]
pub struct AppConfig {
    pub bot_token: Option<String>,
    pub api_base_url: Url,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error if `TELEGRAM_API_BASE_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests don't have to
    /// touch the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL override cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup(BOT_TOKEN_VAR).filter(|t| !t.trim().is_empty());

        let raw_base = lookup(API_BASE_URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url =
            Url::parse(raw_base.trim()).map_err(|e| format!("{}: {}", API_BASE_URL_VAR, e))?;

        Ok(Self {
            bot_token,
            api_base_url,
        })
    }

    #[must_use]
    pub fn new(bot_token: Option<String>, api_base_url: Url) -> Self {
        Self {
            bot_token,
            api_base_url,
        }
    }

    /// # Errors
    ///
    /// Returns `RelayError::MissingConfig` when no token is configured.
    pub fn require_bot_token(&self) -> Result<&str, RelayError> {
        self.bot_token
            .as_deref()
            .ok_or(RelayError::MissingConfig(BOT_TOKEN_VAR))
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url.as_str())
            .finish()
    }
}
