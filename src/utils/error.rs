use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("Invalid JSON in request body: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Missing required lead fields")]
    MissingFields { received: Value },

    #[error("Telegram credentials are not configured: {missing}")]
    MissingCredentials { missing: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Telegram API rejected the message: {details}")]
    TelegramRejected { details: Value },

    #[error("Telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// 錯誤分類，對應請求處理的四種終止路徑
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MalformedRequest,
    Configuration,
    RemoteService,
    Transport,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::MethodNotAllowed { .. }
            | IntakeError::InvalidJson(_)
            | IntakeError::MissingFields { .. } => ErrorCategory::MalformedRequest,
            IntakeError::MissingCredentials { .. }
            | IntakeError::ConfigError { .. }
            | IntakeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            IntakeError::TelegramRejected { .. } => ErrorCategory::RemoteService,
            IntakeError::Transport(_) | IntakeError::IoError(_) => ErrorCategory::Transport,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            IntakeError::MethodNotAllowed { .. } => 405,
            IntakeError::InvalidJson(_) | IntakeError::MissingFields { .. } => 400,
            _ => 500,
        }
    }

    /// JSON payload returned to the caller.
    pub fn to_payload(&self) -> Value {
        match self {
            IntakeError::MethodNotAllowed { .. } => json!({ "error": "Method not allowed" }),
            IntakeError::InvalidJson(_) => json!({ "error": "Invalid JSON in request body" }),
            IntakeError::MissingFields { received } => json!({
                "error": "Name, Email, and Employees are required",
                "received": received,
            }),
            IntakeError::MissingCredentials { .. } => json!({
                "error": "Server misconfigured: Telegram credentials are not set",
            }),
            IntakeError::ConfigError { .. } | IntakeError::InvalidConfigValueError { .. } => {
                json!({ "error": "Server misconfigured" })
            }
            IntakeError::TelegramRejected { details } => json!({
                "error": "Failed to send to Telegram",
                "details": details,
            }),
            IntakeError::Transport(e) => json!({
                "error": "Internal server error",
                "details": e.to_string(),
            }),
            IntakeError::IoError(e) => json!({
                "error": "Internal server error",
                "details": e.to_string(),
            }),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::MalformedRequest => "Fix the request and submit it again",
            ErrorCategory::Configuration => match self {
                IntakeError::MissingCredentials { .. } => {
                    "Set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID and restart the service"
                }
                _ => "Correct the reported configuration value and restart the service",
            },
            ErrorCategory::RemoteService => {
                "Check the bot token, the chat id and that the bot is a member of the chat"
            }
            ErrorCategory::Transport => "Check network connectivity to the Telegram API",
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_category() {
        let err = IntakeError::MethodNotAllowed {
            method: "GET".to_string(),
        };
        assert_eq!(err.status_code(), 405);
        assert_eq!(err.category(), ErrorCategory::MalformedRequest);

        let err = IntakeError::MissingFields {
            received: json!({}),
        };
        assert_eq!(err.status_code(), 400);

        let err = IntakeError::MissingCredentials {
            missing: "TELEGRAM_CHAT_ID".to_string(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_config_payloads() {
        let err = IntakeError::MissingCredentials {
            missing: "TELEGRAM_BOT_TOKEN".to_string(),
        };
        assert_eq!(
            err.to_payload(),
            json!({ "error": "Server misconfigured: Telegram credentials are not set" })
        );

        let err = IntakeError::InvalidConfigValueError {
            field: "LEAD_TIMEZONE".to_string(),
            value: "Mars/Olympus".to_string(),
            reason: "unknown zone".to_string(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_payload(), json!({ "error": "Server misconfigured" }));
        assert!(!err.recovery_suggestion().contains("TELEGRAM_BOT_TOKEN"));

        let err = IntakeError::ConfigError {
            message: "Failed to parse config file".to_string(),
        };
        assert_eq!(err.to_payload(), json!({ "error": "Server misconfigured" }));
    }

    #[test]
    fn test_invalid_json_payload() {
        let parse_err = serde_json::from_str::<Value>("{oops").unwrap_err();
        let err = IntakeError::InvalidJson(parse_err);
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_payload(),
            json!({ "error": "Invalid JSON in request body" })
        );
    }

    #[test]
    fn test_rejected_payload_echoes_details() {
        let details = json!({ "ok": false, "error_code": 400, "description": "chat not found" });
        let err = IntakeError::TelegramRejected {
            details: details.clone(),
        };
        let payload = err.to_payload();
        assert_eq!(payload["error"], "Failed to send to Telegram");
        assert_eq!(payload["details"], details);
        assert_eq!(err.category(), ErrorCategory::RemoteService);
    }
}
