//! Report relay - forwards AstroTracker PDF reports to users over Telegram.
//!
//! A single API Lambda receives `{pdfBase64, userId}` from the web app,
//! decodes the report and uploads it with the Telegram Bot API's
//! `sendDocument` method.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda behind API Gateway for serverless execution
//! - reqwest multipart uploads for the Bot API call
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use report_relay::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     report_relay::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     lambda_runtime::run(lambda_runtime::service_fn(|event| {
//!         report_relay::api::handler(event, &config)
//!     }))
//!     .await
//! }
//! ```

// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod telegram;
pub mod utils;

pub use errors::RelayError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once; only
/// the first call installs a subscriber.
///
/// # Example
///
/// ```
/// report_relay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
