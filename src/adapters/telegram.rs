use crate::config::{IntakeConfig, TelegramCredentials};
use crate::domain::ports::Notifier;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const PARSE_MODE: &str = "Markdown";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Bot API client for `sendMessage`.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    pub fn from_config(config: &IntakeConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self::new(client, config.api_base.clone()))
    }

    fn url(&self, bot_token: &str, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base.trim_end_matches('/'),
            bot_token,
            method
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_markdown(&self, credentials: &TelegramCredentials, text: &str) -> Result<Value> {
        let payload = SendMessage {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: PARSE_MODE,
        };

        // URL 含有 bot token，錯誤訊息中不保留
        let response = self
            .client
            .post(self.url(&credentials.bot_token, "sendMessage"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| IntakeError::Transport(e.without_url()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| IntakeError::Transport(e.without_url()))?;
        tracing::debug!("Telegram API response status: {}", status);

        let reply = match serde_json::from_str::<Value>(&body_text) {
            Ok(reply) => reply,
            Err(_) => {
                return Err(IntakeError::TelegramRejected {
                    details: json!({ "status": status.as_u16(), "body": body_text }),
                })
            }
        };

        if reply.get("ok").and_then(Value::as_bool) == Some(true) {
            Ok(reply)
        } else {
            tracing::error!("Telegram API error: {}", reply);
            Err(IntakeError::TelegramRejected { details: reply })
        }
    }
}
