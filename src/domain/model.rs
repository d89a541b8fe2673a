use crate::utils::error::{IntakeError, Result};
use serde::Serialize;
use serde_json::Value;

/// A website demo request, as submitted by the landing page form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub employees: String,
    pub source: Option<String>,
}

impl LeadSubmission {
    /// Builds a submission from a parsed request body.
    ///
    /// `name`, `email` and `employees` must be present and truthy. A body that is
    /// not an object behaves like an empty one.
    pub fn from_json(body: &Value) -> Result<Self> {
        let field = |key: &str| body.get(key).and_then(render_truthy);

        match (field("name"), field("email"), field("employees")) {
            (Some(name), Some(email), Some(employees)) => Ok(Self {
                name,
                email,
                phone: field("phone"),
                employees,
                source: field("source"),
            }),
            _ => Err(IntakeError::MissingFields {
                received: body.clone(),
            }),
        }
    }
}

/// Renders a form value as message text, or `None` when the value is falsy
/// (`null`, `false`, zero or an empty string).
///
/// Objects and arrays are rendered as compact JSON, not `[object Object]` or a
/// comma-joined list.
fn render_truthy(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
