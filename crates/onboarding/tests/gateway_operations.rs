mod common;

use std::time::Duration;

use common::{gateway, gateway_with_timeout, ADMIN_TOKEN, CLIENT_ID};
use onboarding::gateway::{Reply, WebhookPayload};
use onboarding::incode::HARDWARE_ID_HEADER;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_start(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/omni/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "interviewId": "iv-42",
            "token": "tok-42"
        })))
        .mount(server)
        .await;
}

fn to_json<T: serde::Serialize>(reply: &Reply<T>) -> Value {
    serde_json::to_value(reply).expect("reply serializes")
}

#[tokio::test]
async fn start_session_returns_provider_identifiers_verbatim() {
    let server = MockServer::start().await;
    mount_start(&server).await;

    let reply = gateway(&server).start_session().await;

    assert_eq!(
        to_json(&reply),
        json!({ "interviewId": "iv-42", "token": "tok-42" })
    );
}

#[tokio::test]
async fn start_session_failure_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/omni/start"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let reply = gateway(&server).start_session().await;

    assert!(!reply.is_success());
    let body = to_json(&reply);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("500 Internal Server Error from POST"));
}

#[tokio::test]
async fn onboarding_url_chains_start_token_into_second_call() {
    let server = MockServer::start().await;
    mount_start(&server).await;
    Mock::given(method("GET"))
        .and(path("/omni/onboarding-url"))
        .and(query_param("clientId", CLIENT_ID))
        .and(header(HARDWARE_ID_HEADER, "tok-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://onboarding.example/start/iv-42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway(&server).create_session_with_onboarding_url().await;

    assert_eq!(
        serde_json::to_string(&reply).expect("serializes"),
        r#"{"interviewId":"iv-42","token":"tok-42","url":"https://onboarding.example/start/iv-42","success":true}"#
    );
}

#[tokio::test]
async fn onboarding_url_failure_in_second_call_is_normalized() {
    let server = MockServer::start().await;
    mount_start(&server).await;
    Mock::given(method("GET"))
        .and(path("/omni/onboarding-url"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let reply = gateway(&server).create_session_with_onboarding_url().await;

    let body = to_json(&reply);
    assert_eq!(body.as_object().map(|map| map.len()), Some(2));
    assert_eq!(body["success"], json!(false));
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("404 Not Found from GET"));
}

#[tokio::test]
async fn onboarding_url_start_timeout_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/omni/start"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "interviewId": "late", "token": "late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let reply = gateway_with_timeout(&server, Duration::from_millis(200))
        .create_session_with_onboarding_url()
        .await;

    let body = to_json(&reply);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("/omni/start"));
}

#[tokio::test]
async fn fetch_score_surfaces_overall_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/omni/get/score"))
        .and(query_param("id", "abc123"))
        .and(header(HARDWARE_ID_HEADER, "tok1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "overall": { "status": "Success" } })),
        )
        .mount(&server)
        .await;

    let reply = gateway(&server).fetch_score("abc123", "tok1").await;

    assert_eq!(
        serde_json::to_string(&reply).expect("serializes"),
        r#"{"score":"Success","success":true}"#
    );
}

#[tokio::test]
async fn fetch_onboarding_status_always_uses_admin_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/omni/get/onboarding/status"))
        .and(query_param("id", "iv-42"))
        .and(header(HARDWARE_ID_HEADER, ADMIN_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "onboardingStatus": "ID_VALIDATION_FINISHED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway(&server).fetch_onboarding_status("iv-42").await;

    assert_eq!(
        to_json(&reply),
        json!({ "onboardingStatus": "ID_VALIDATION_FINISHED", "success": true })
    );
}

#[tokio::test]
async fn handle_webhook_echoes_payload_with_timestamp() {
    let server = MockServer::start().await;
    let gateway = gateway(&server);
    let body = r#"{"interviewId":"iv-42","status":"ONBOARDING_FINISHED","nested":{"attempts":2}}"#;
    let payload = WebhookPayload::from_slice(body.as_bytes()).expect("object payload");

    let first = gateway.handle_webhook(payload.clone());
    let second = gateway.handle_webhook(payload.clone());

    assert_eq!(first.data, payload);
    assert_eq!(first.data.as_str(), body);
    assert_eq!(first.data, second.data);
    assert!(
        chrono::NaiveDateTime::parse_from_str(&first.time_stamp, "%Y-%m-%d %H:%M:%S").is_ok()
    );
    assert!(server
        .received_requests()
        .await
        .expect("recording enabled")
        .is_empty());
}
