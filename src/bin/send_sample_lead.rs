use chrono::Utc;
use lead_relay::core::message::compose_message;
use lead_relay::utils::validation::Validate;
use lead_relay::{IntakeConfig, LeadSubmission, Notifier, TelegramNotifier};
use serde_json::json;

/// 以環境變數中的憑證送出一筆示範 lead，用來確認 bot 與 chat 設定
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("🚀 Sending a sample lead to Telegram");

    let config = IntakeConfig::from_env()?;
    config.validate()?;
    let credentials = config.credentials()?;

    println!("✅ Configuration loaded");
    println!("📋 API base: {}", config.api_base);
    println!("📋 Chat id:  {}", credentials.chat_id);

    let lead = LeadSubmission::from_json(&json!({
        "name": "Sample Lead",
        "email": "sample@example.com",
        "phone": "+77001234567",
        "employees": "10-50",
        "source": "hero_section"
    }))?;
    let text = compose_message(&lead, &Utc::now().with_timezone(&config.timezone));

    let notifier = TelegramNotifier::from_config(&config)?;
    let reply = notifier.send_markdown(&credentials, &text).await?;

    let message_id = reply
        .pointer("/result/message_id")
        .and_then(|id| id.as_i64())
        .map(|id| id.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    println!("\n🎉 Delivered! message_id = {}", message_id);

    Ok(())
}
