pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "server")]
pub use crate::config::CliConfig;

pub use crate::adapters::telegram::TelegramNotifier;
pub use crate::config::{IntakeConfig, TelegramCredentials};
pub use crate::core::{IntakeHandler, IntakeRequest, IntakeResponse, LeadSubmission, Notifier, RequestBody};
pub use crate::utils::error::{IntakeError, Result};
