use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is not set. Request traces from the HTTP
/// layer are emitted at info, so they show up in both modes.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "lead_relay=debug,tower_http=debug,info"
    } else {
        "lead_relay=info,tower_http=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger() {
    // CloudWatch 已記錄時間，JSON 行內不重複
    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .json(),
        )
        .init();
}
