use crate::config::IntakeConfig;
use crate::core::message::compose_message;
use crate::domain::model::LeadSubmission;
use crate::domain::ports::Notifier;
use crate::utils::error::{ErrorCategory, IntakeError, Result};
use chrono::Utc;
use serde_json::{json, Value};

pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// How the hosting surface hands over the request body.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Unparsed request bytes; parsed here, failing with `InvalidJson`.
    Raw(Vec<u8>),
    /// A body the runtime has already decoded.
    Parsed(Value),
}

impl RequestBody {
    pub fn into_json(self) -> Result<Value> {
        match self {
            RequestBody::Raw(bytes) => serde_json::from_slice(&bytes).map_err(IntakeError::InvalidJson),
            RequestBody::Parsed(value) => Ok(value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntakeRequest {
    pub method: String,
    pub body: RequestBody,
}

impl IntakeRequest {
    pub fn new(method: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: method.into(),
            body,
        }
    }

    fn is_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }
}

/// Transport-agnostic response; the server and Lambda adapters translate it.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl IntakeResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub struct IntakeHandler<N: Notifier> {
    config: IntakeConfig,
    notifier: N,
}

impl<N: Notifier> IntakeHandler<N> {
    pub fn new(config: IntakeConfig, notifier: N) -> Self {
        Self { config, notifier }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub async fn handle(&self, request: IntakeRequest) -> IntakeResponse {
        if request.is_method("OPTIONS") {
            return self.preflight();
        }

        match self.process(request).await {
            Ok(_) => self.respond(
                200,
                json!({ "success": true, "message": "Sent to Telegram" }),
            ),
            Err(e) => {
                match e.category() {
                    ErrorCategory::MalformedRequest => {
                        tracing::warn!("⚠️ Rejected lead submission: {}", e)
                    }
                    _ => {
                        tracing::error!("❌ Lead relay failed: {}", e);
                        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                    }
                }
                self.respond(e.status_code(), e.to_payload())
            }
        }
    }

    async fn process(&self, request: IntakeRequest) -> Result<Value> {
        if !request.is_method("POST") {
            return Err(IntakeError::MethodNotAllowed {
                method: request.method,
            });
        }

        let body = request.body.into_json()?;
        let lead = LeadSubmission::from_json(&body)?;
        // 在驗證請求之後才檢查憑證，缺少時不發出任何外部請求
        let credentials = self.config.credentials()?;

        let received_at = Utc::now().with_timezone(&self.config.timezone);
        let text = compose_message(&lead, &received_at);

        tracing::debug!("Relaying lead from {} to chat {}", lead.email, credentials.chat_id);
        let reply = self.notifier.send_markdown(&credentials, &text).await?;
        tracing::info!("✅ Lead from {} sent to Telegram", lead.email);
        Ok(reply)
    }

    fn preflight(&self) -> IntakeResponse {
        IntakeResponse {
            status: 200,
            headers: vec![
                (
                    "Access-Control-Allow-Origin",
                    self.config.allowed_origin.clone(),
                ),
                ("Access-Control-Allow-Methods", ALLOW_METHODS.to_string()),
                ("Access-Control-Allow-Headers", ALLOW_HEADERS.to_string()),
            ],
            body: None,
        }
    }

    fn respond(&self, status: u16, body: Value) -> IntakeResponse {
        IntakeResponse {
            status,
            headers: vec![(
                "Access-Control-Allow-Origin",
                self.config.allowed_origin.clone(),
            )],
            body: Some(body),
        }
    }
}
