#[cfg(feature = "server")]
pub mod cli;

use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field, validate_url,
    Validate,
};
use chrono_tz::Tz;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::Path;

#[cfg(feature = "server")]
pub use cli::CliConfig;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_TIMEZONE: Tz = Tz::Asia__Almaty;

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_ALLOWED_ORIGIN: &str = "ALLOWED_ORIGIN";
pub const ENV_API_BASE: &str = "TELEGRAM_API_BASE";
pub const ENV_TIMEZONE: &str = "LEAD_TIMEZONE";
pub const ENV_TIMEOUT_SECS: &str = "TELEGRAM_TIMEOUT_SECS";

/// Optional TOML file with the same keys as the environment variables.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub allowed_origin: Option<String>,
    pub api_base: Option<String>,
    pub timezone: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| IntakeError::ConfigError {
            message: format!(
                "Failed to parse config file {}: {}",
                path.as_ref().display(),
                e
            ),
        })
    }
}

/// Credentials needed for one `sendMessage` call.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Process-wide settings, built once at startup and handed to the intake handler.
///
/// Credentials stay optional here: a service started without them still answers
/// every request, reporting the misconfiguration as a server error instead of
/// refusing to boot.
#[derive(Clone)]
pub struct IntakeConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub allowed_origin: String,
    pub api_base: String,
    pub timezone: Tz,
    pub request_timeout_secs: Option<u64>,
}

impl fmt::Debug for IntakeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .field("allowed_origin", &self.allowed_origin)
            .field("api_base", &self.api_base)
            .field("timezone", &self.timezone)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timezone: DEFAULT_TIMEZONE,
            request_timeout_secs: None,
        }
    }
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_sources(FileConfig::default(), |key| env::var(key).ok())
    }

    /// Loads the optional TOML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, |key| env::var(key).ok())
    }

    pub fn from_sources<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空字串視為未設定
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timezone = match lookup(ENV_TIMEZONE).or(file.timezone) {
            Some(name) => parse_timezone(&name)?,
            None => DEFAULT_TIMEZONE,
        };

        let request_timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                IntakeError::InvalidConfigValueError {
                    field: ENV_TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => file.request_timeout_secs,
        };

        Ok(Self {
            bot_token: lookup(ENV_BOT_TOKEN).or(file.bot_token),
            chat_id: lookup(ENV_CHAT_ID).or(file.chat_id),
            allowed_origin: lookup(ENV_ALLOWED_ORIGIN)
                .or(file.allowed_origin)
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            api_base: lookup(ENV_API_BASE)
                .or(file.api_base)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timezone,
            request_timeout_secs,
        })
    }

    pub fn with_credentials(mut self, bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        self.bot_token = Some(bot_token.into());
        self.chat_id = Some(chat_id.into());
        self
    }

    pub fn credentials(&self) -> Result<TelegramCredentials> {
        let bot_token = validate_required_field(ENV_BOT_TOKEN, &self.bot_token)?;
        let chat_id = validate_required_field(ENV_CHAT_ID, &self.chat_id)?;
        Ok(TelegramCredentials {
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    /// Names of the credential variables that are not set.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [(ENV_BOT_TOKEN, &self.bot_token), (ENV_CHAT_ID, &self.chat_id)]
            .into_iter()
            .filter(|(name, value)| validate_required_field(name, value).is_err())
            .map(|(name, _)| name)
            .collect()
    }
}

impl Validate for IntakeConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_non_empty_string("allowed_origin", &self.allowed_origin)?;
        if let Some(timeout) = self.request_timeout_secs {
            validate_positive_number("request_timeout_secs", timeout, 1)?;
        }

        tracing::debug!("✅ Intake configuration validation passed");
        Ok(())
    }
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| IntakeError::InvalidConfigValueError {
            field: ENV_TIMEZONE.to_string(),
            value: name.to_string(),
            reason: e.to_string(),
        })
}
