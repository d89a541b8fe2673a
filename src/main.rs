use anyhow::Context;
use clap::Parser;
use lead_relay::adapters::http::router;
use lead_relay::utils::{logger, validation::Validate};
use lead_relay::{CliConfig, IntakeConfig, IntakeHandler, TelegramNotifier};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting lead-relay server");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = IntakeConfig::load(cli.config.as_deref())
        .context("failed to load intake configuration")?;

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(
            "⚠️ {} not set, lead submissions will be answered with 500",
            missing.join(", ")
        );
    }
    if config.allowed_origin == "*" {
        tracing::warn!("⚠️ ALLOWED_ORIGIN not set, accepting requests from any origin");
    }

    let notifier = TelegramNotifier::from_config(&config)?;
    let handler = Arc::new(IntakeHandler::new(config, notifier));
    let app = router(handler, &cli.path);

    let listener = TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    tracing::info!(
        "🚀 Listening on {} (intake endpoint: {})",
        listener.local_addr()?,
        cli.path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
