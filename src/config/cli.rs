use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lead-relay")]
#[command(about = "Relays website lead submissions to a Telegram chat")]
pub struct CliConfig {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    #[arg(long, default_value = "/api/demo", help = "Path the intake endpoint is mounted on")]
    pub path: String,

    #[arg(long, help = "Optional TOML file with Telegram settings")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("path", &self.path)?;

        // axum 只接受以 `/` 開頭的路由
        if !self.path.starts_with('/') {
            return Err(IntakeError::InvalidConfigValueError {
                field: "path".to_string(),
                value: self.path.clone(),
                reason: "Path must start with '/'".to_string(),
            });
        }

        tracing::debug!("✅ CLI configuration validation passed");
        Ok(())
    }
}
