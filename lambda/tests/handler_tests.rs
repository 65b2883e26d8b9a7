//! End-to-end tests of the Lambda handler against a mocked Telegram Bot API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::{Context, LambdaEvent};
use report_relay::api::handler;
use report_relay::core::config::AppConfig;
use report_relay::telegram::{REPORT_CAPTION, REPORT_FILENAME, SEND_FAILED_FALLBACK};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:TEST-TOKEN";
const SEND_PATH: &str = "/bot123456:TEST-TOKEN/sendDocument";
const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

fn config_for(server: &MockServer, token: Option<&str>) -> AppConfig {
    AppConfig::new(
        token.map(ToString::to_string),
        Url::parse(&server.uri()).unwrap(),
    )
}

fn proxy_event(body: &Value) -> LambdaEvent<Value> {
    LambdaEvent::new(
        json!({
            "httpMethod": "POST",
            "path": "/api/send-pdf",
            "headers": { "Content-Type": "application/json" },
            "isBase64Encoded": false,
            "body": body.to_string()
        }),
        Context::default(),
    )
}

fn valid_body() -> Value {
    json!({ "pdfBase64": STANDARD.encode(PDF), "userId": "987654321" })
}

fn status_and_body(resp: &Value) -> (u64, Value) {
    let status = resp["statusCode"].as_u64().unwrap();
    let body = serde_json::from_str(resp["body"].as_str().unwrap()).unwrap();
    (status, body)
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

async fn mount_never_called(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_success_returns_exactly_success_true() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {"message_id": 7}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, Some(TOKEN));
    let resp = handler(proxy_event(&valid_body()), &config).await.unwrap();

    let (status, body) = status_and_body(&resp);
    assert_eq!(status, 200);
    assert_eq!(body, json!({"success": true}));
}

#[tokio::test]
async fn test_multipart_payload_matches_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let config = config_for(&server, Some(TOKEN));
    handler(proxy_event(&valid_body()), &config).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];

    let content_type = req
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = &req.body;
    assert!(contains_bytes(body, b"name=\"chat_id\"\r\n\r\n987654321\r\n"));
    assert!(contains_bytes(
        body,
        format!("name=\"caption\"\r\n\r\n{REPORT_CAPTION}\r\n").as_bytes()
    ));
    assert!(contains_bytes(
        body,
        format!("name=\"document\"; filename=\"{REPORT_FILENAME}\"").as_bytes()
    ));
    assert!(contains_bytes(body, b"Content-Type: application/pdf"));
    assert!(contains_bytes(body, PDF));
}

#[tokio::test]
async fn test_upstream_description_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, Some(TOKEN));
    let resp = handler(proxy_event(&valid_body()), &config).await.unwrap();

    let (status, body) = status_and_body(&resp);
    assert_eq!(status, 500);
    assert_eq!(body, json!({"message": "Bad Request: chat not found"}));
}

#[tokio::test]
async fn test_upstream_failure_without_description_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"ok": false})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, Some(TOKEN));
    let resp = handler(proxy_event(&valid_body()), &config).await.unwrap();

    let (status, body) = status_and_body(&resp);
    assert_eq!(status, 500);
    assert_eq!(body["message"], SEND_FAILED_FALLBACK);
}

#[tokio::test]
async fn test_non_json_upstream_body_is_a_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let config = config_for(&server, Some(TOKEN));
    let resp = handler(proxy_event(&valid_body()), &config).await.unwrap();

    let (status, body) = status_and_body(&resp);
    assert_eq!(status, 500);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to parse Telegram response")
    );
}

#[tokio::test]
async fn test_missing_fields_are_rejected_without_calling_telegram() {
    let server = MockServer::start().await;
    mount_never_called(&server).await;
    let config = config_for(&server, Some(TOKEN));

    for body in [
        json!({}),
        json!({"pdfBase64": STANDARD.encode(PDF)}),
        json!({"userId": "987654321"}),
    ] {
        let resp = handler(proxy_event(&body), &config).await.unwrap();
        let (status, body) = status_and_body(&resp);
        assert_eq!(status, 400);
        assert_eq!(
            body,
            json!({"success": false, "message": "Missing PDF data or user ID."})
        );
    }
}

#[tokio::test]
async fn test_missing_token_always_yields_500() {
    let server = MockServer::start().await;
    mount_never_called(&server).await;
    let config = config_for(&server, None);

    for body in [valid_body(), json!({})] {
        let resp = handler(proxy_event(&body), &config).await.unwrap();
        let (status, body) = status_and_body(&resp);
        assert_eq!(status, 500);
        assert_eq!(
            body,
            json!({"success": false, "message": "Server configuration error."})
        );
    }
}

#[tokio::test]
async fn test_undecodable_pdf_is_a_server_error() {
    let server = MockServer::start().await;
    mount_never_called(&server).await;
    let config = config_for(&server, Some(TOKEN));

    let body = json!({"pdfBase64": "%%% not base64 %%%", "userId": "1"});
    let resp = handler(proxy_event(&body), &config).await.unwrap();

    let (status, body) = status_and_body(&resp);
    assert_eq!(status, 500);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to decode PDF data")
    );
}

#[tokio::test]
async fn test_non_pdf_bytes_are_forwarded_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, Some(TOKEN));
    let body = json!({"pdfBase64": STANDARD.encode(b"plain text, not a pdf"), "userId": "1"});
    let resp = handler(proxy_event(&body), &config).await.unwrap();
    assert_eq!(resp["statusCode"], 200);

    let requests = server.received_requests().await.unwrap();
    assert!(contains_bytes(&requests[0].body, b"plain text, not a pdf"));
}

#[tokio::test]
async fn test_non_post_is_rejected() {
    let server = MockServer::start().await;
    mount_never_called(&server).await;
    let config = config_for(&server, Some(TOKEN));

    let event = LambdaEvent::new(
        json!({"requestContext": {"http": {"method": "GET"}}, "rawPath": "/api/send-pdf"}),
        Context::default(),
    );
    let resp = handler(event, &config).await.unwrap();
    assert_eq!(resp["statusCode"], 405);
    assert_eq!(resp["headers"]["Allow"], "POST");
}

#[tokio::test]
async fn test_base64_encoded_gateway_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, Some(TOKEN));
    let event = LambdaEvent::new(
        json!({
            "requestContext": {"http": {"method": "POST"}},
            "isBase64Encoded": true,
            "body": STANDARD.encode(valid_body().to_string())
        }),
        Context::default(),
    );
    let resp = handler(event, &config).await.unwrap();
    assert_eq!(resp["statusCode"], 200);
}

#[tokio::test]
async fn test_direct_invocation_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, Some(TOKEN));
    let resp = handler(LambdaEvent::new(valid_body(), Context::default()), &config)
        .await
        .unwrap();
    assert_eq!(resp["statusCode"], 200);
}

#[tokio::test]
async fn test_transport_failure_does_not_leak_token() {
    // Nothing listens on port 1
    let config = AppConfig::new(
        Some(TOKEN.to_string()),
        Url::parse("http://127.0.0.1:1").unwrap(),
    );
    let resp = handler(proxy_event(&valid_body()), &config).await.unwrap();

    let (status, body) = status_and_body(&resp);
    assert_eq!(status, 500);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to send HTTP request"));
    assert!(!message.contains("TEST-TOKEN"));
}

#[test]
fn test_decoding_is_idempotent() {
    use report_relay::utils::pdf::decode_pdf_base64;

    let encoded = STANDARD.encode(PDF);
    let first = decode_pdf_base64(&encoded).unwrap();
    let second = decode_pdf_base64(&encoded).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, PDF);
}
