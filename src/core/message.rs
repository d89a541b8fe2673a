use crate::core::source::source_label;
use crate::domain::model::LeadSubmission;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

pub const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━";
pub const PHONE_PLACEHOLDER: &str = "Не указан";

/// `ru-RU` short date-time style, e.g. `18.10.2026, 14:05:09`.
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Renders the Telegram notification for a lead. Values are inserted as-is.
pub fn compose_message<Tz>(lead: &LeadSubmission, received_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let phone = lead.phone.as_deref().unwrap_or(PHONE_PLACEHOLDER);
    let source = source_label(lead.source.as_deref());

    [
        "📩 *Новая заявка на демо L8 DOCS!*".to_string(),
        DIVIDER.to_string(),
        format!("👤 *Имя:* {}", lead.name),
        format!("📧 *Email:* {}", lead.email),
        format!("📱 *Телефон:* {}", phone),
        format!("👥 *Сотрудников:* {}", lead.employees),
        format!("📍 *Источник:* {}", source),
        DIVIDER.to_string(),
        format!("🕒 *Время:* {}", received_at.format(TIMESTAMP_FORMAT)),
    ]
    .join("\n")
}
