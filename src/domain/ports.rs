use crate::config::TelegramCredentials;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Outbound side of the intake flow: delivers one Markdown message to a chat.
///
/// Implementations return the remote reply on acceptance, and
/// `IntakeError::TelegramRejected` when the remote API reports a failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_markdown(&self, credentials: &TelegramCredentials, text: &str) -> Result<Value>;
}
