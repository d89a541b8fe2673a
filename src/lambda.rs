#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use lead_relay::adapters::lambda::{request_from_event, response_to_event};
#[cfg(feature = "lambda")]
use lead_relay::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use lead_relay::{IntakeConfig, IntakeHandler, TelegramNotifier};
#[cfg(feature = "lambda")]
use serde_json::Value;
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &IntakeHandler<TelegramNotifier>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let request = request_from_event(&event.payload);
    tracing::info!(
        request_id = %event.context.request_id,
        method = %request.method,
        "Handling lead intake event"
    );

    let response = handler.handle(request).await;
    tracing::info!(status = response.status, "Lead intake event completed");
    Ok(response_to_event(response))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 配置只在冷啟動時讀取一次
    let config = IntakeConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!("{} not set, lead submissions will fail", missing.join(", "));
    }

    let notifier = TelegramNotifier::from_config(&config)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let handler = Arc::new(IntakeHandler::new(config, notifier));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move { function_handler(&handler, event).await }
    }))
    .await
}
