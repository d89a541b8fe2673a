use httpmock::prelude::*;
use lead_relay::{
    IntakeConfig, IntakeHandler, IntakeRequest, RequestBody, TelegramNotifier,
};
use serde_json::{json, Value};

const TOKEN: &str = "123456:test-token";
const CHAT_ID: &str = "-1001234567890";

fn handler_for(server: &MockServer) -> IntakeHandler<TelegramNotifier> {
    let mut config = IntakeConfig::default().with_credentials(TOKEN, CHAT_ID);
    config.api_base = server.base_url();
    let notifier = TelegramNotifier::from_config(&config).unwrap();
    IntakeHandler::new(config, notifier)
}

fn post_json(body: Value) -> IntakeRequest {
    IntakeRequest::new("POST", RequestBody::Raw(serde_json::to_vec(&body).unwrap()))
}

fn jane(source: Option<&str>) -> Value {
    let mut body = json!({
        "name": "Jane",
        "email": "jane@co.com",
        "phone": "+77001234567",
        "employees": "10-50"
    });
    if let Some(source) = source {
        body["source"] = json!(source);
    }
    body
}

#[tokio::test]
async fn test_lead_is_relayed_to_telegram() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .json_body_partial(format!(
                r#"{{ "chat_id": "{}", "parse_mode": "Markdown" }}"#,
                CHAT_ID
            ))
            .body_contains("Jane")
            .body_contains("jane@co.com")
            .body_contains("+77001234567")
            .body_contains("10-50")
            .body_contains("Hero Section (Главный экран)");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "ok": true, "result": { "message_id": 42 } }));
    });

    let handler = handler_for(&server);
    let response = handler.handle(post_json(jane(Some("hero_section")))).await;

    send_mock.assert();
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        Some(json!({ "success": true, "message": "Sent to Telegram" }))
    );
}

#[tokio::test]
async fn test_unknown_source_is_sent_verbatim() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .body_contains("newsletter");
        then.status(200).json_body(json!({ "ok": true, "result": {} }));
    });

    let response = handler_for(&server)
        .handle(post_json(jane(Some("newsletter"))))
        .await;

    send_mock.assert();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_missing_source_is_reported_as_unknown() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .body_contains("unknown");
        then.status(200).json_body(json!({ "ok": true, "result": {} }));
    });

    let response = handler_for(&server).handle(post_json(jane(None))).await;

    send_mock.assert();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_telegram_rejection_returns_500_with_details() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST).path(format!("/bot{}/sendMessage", TOKEN));
        then.status(400).json_body(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        }));
    });

    let response = handler_for(&server)
        .handle(post_json(jane(Some("hero_section"))))
        .await;

    send_mock.assert();
    assert_eq!(response.status, 500);
    let payload = response.body.unwrap();
    assert_eq!(payload["error"], "Failed to send to Telegram");
    assert_eq!(payload["details"]["error_code"], 400);
    assert_eq!(payload["details"]["description"], "Bad Request: chat not found");
}

#[tokio::test]
async fn test_non_json_reply_is_treated_as_rejection() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST).path(format!("/bot{}/sendMessage", TOKEN));
        then.status(502).body("Bad Gateway");
    });

    let response = handler_for(&server)
        .handle(post_json(jane(None)))
        .await;

    send_mock.assert();
    assert_eq!(response.status, 500);
    let payload = response.body.unwrap();
    assert_eq!(payload["details"]["status"], 502);
    assert_eq!(payload["details"]["body"], "Bad Gateway");
}

#[tokio::test]
async fn test_transport_failure_returns_500() {
    let mut config = IntakeConfig::default().with_credentials(TOKEN, CHAT_ID);
    // 沒有服務在此埠口監聽
    config.api_base = "http://127.0.0.1:1".to_string();
    let notifier = TelegramNotifier::from_config(&config).unwrap();
    let handler = IntakeHandler::new(config, notifier);

    let response = handler.handle(post_json(jane(None))).await;

    assert_eq!(response.status, 500);
    let payload = response.body.unwrap();
    assert_eq!(payload["error"], "Internal server error");
    let details = payload["details"].as_str().unwrap();
    assert!(!details.contains(TOKEN), "token leaked into details: {details}");
}

#[tokio::test]
async fn test_missing_credentials_never_call_telegram() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({ "ok": true }));
    });

    for config in [
        IntakeConfig::default(),
        IntakeConfig {
            bot_token: Some(TOKEN.to_string()),
            ..IntakeConfig::default()
        },
        IntakeConfig {
            chat_id: Some(CHAT_ID.to_string()),
            ..IntakeConfig::default()
        },
    ] {
        let mut config = config;
        config.api_base = server.base_url();
        let notifier = TelegramNotifier::from_config(&config).unwrap();
        let handler = IntakeHandler::new(config, notifier);

        let response = handler.handle(post_json(jane(None))).await;
        assert_eq!(response.status, 500);
        assert_eq!(
            response.body.unwrap()["error"],
            "Server misconfigured: Telegram credentials are not set"
        );
    }

    send_mock.assert_hits(0);
}

#[tokio::test]
async fn test_invalid_requests_never_call_telegram() {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({ "ok": true }));
    });
    let handler = handler_for(&server);

    let response = handler
        .handle(IntakeRequest::new("GET", RequestBody::Raw(Vec::new())))
        .await;
    assert_eq!(response.status, 405);

    let response = handler
        .handle(IntakeRequest::new("POST", RequestBody::Raw(b"not json".to_vec())))
        .await;
    assert_eq!(response.status, 400);

    for missing in ["name", "email", "employees"] {
        let mut body = jane(None);
        body.as_object_mut().unwrap().remove(missing);
        let response = handler.handle(post_json(body)).await;
        assert_eq!(response.status, 400, "without {missing}");
    }

    send_mock.assert_hits(0);
}
