use report_relay::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    report_relay::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        lambda_runtime::Error::from(e)
    })?;

    lambda_runtime::run(lambda_runtime::service_fn(|event| {
        report_relay::api::handler(event, &config)
    }))
    .await
}
