use crate::core::{IntakeRequest, IntakeResponse, RequestBody};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

/// Turns an API Gateway proxy event (REST v1 or HTTP v2) into an intake request.
///
/// A string `body` is handed over raw, an object `body` counts as already
/// parsed. An event with no gateway fields at all is a direct invocation and the
/// event itself is the lead.
pub fn request_from_event(event: &Value) -> IntakeRequest {
    let method = event
        .get("httpMethod")
        .and_then(Value::as_str)
        .or_else(|| event.pointer("/requestContext/http/method").and_then(Value::as_str));

    let is_gateway_event = method.is_some() || event.get("requestContext").is_some();
    let body = match event.get("body") {
        Some(Value::String(raw)) => RequestBody::Raw(decode_body(event, raw)),
        Some(Value::Null) | None if is_gateway_event => RequestBody::Raw(Vec::new()),
        Some(Value::Null) | None => RequestBody::Parsed(event.clone()),
        Some(parsed) => RequestBody::Parsed(parsed.clone()),
    };

    IntakeRequest::new(method.unwrap_or("POST"), body)
}

fn decode_body(event: &Value, raw: &str) -> Vec<u8> {
    let encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return raw.as_bytes().to_vec();
    }

    STANDARD.decode(raw).unwrap_or_else(|e| {
        // 解碼失敗時交給 JSON 解析回報 400
        tracing::warn!("Failed to decode base64 request body: {}", e);
        Vec::new()
    })
}

/// Renders the proxy integration response object.
pub fn response_to_event(response: IntakeResponse) -> Value {
    let mut headers = Map::new();
    for (name, value) in response.headers {
        headers.insert(name.to_string(), Value::String(value));
    }

    let body = match response.body {
        Some(body) => {
            headers.insert(
                "Content-Type".to_string(),
                Value::String("application/json".to_string()),
            );
            body.to_string()
        }
        None => String::new(),
    };

    serde_json::json!({
        "statusCode": response.status,
        "headers": headers,
        "body": body,
    })
}
