//! `/api/debug` and `/api/test` against a mocked completion service.

use pairdebug_gateway::{build_prompt, NO_ISSUES_PLACEHOLDER, PROMPT_PREAMBLE};
use pairdebug_integration_tests::TestServer;
use pairdebug_providers::HuggingFaceProvider;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_with_upstream(upstream: &MockServer) -> TestServer {
    let provider =
        HuggingFaceProvider::new(format!("{}/models/zephyr", upstream.uri()), "hf_test").unwrap();
    TestServer::start(Arc::new(provider)).await
}

async fn post_debug(server: &TestServer, code: &str) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(server.url("/api/debug"))
        .json(&json!({ "code": code }))
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_prompt_echo_is_stripped() {
    let upstream = MockServer::start().await;
    let code = "function add(a, b) { return a - b; }";
    Mock::given(method("POST"))
        .and(path("/models/zephyr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "generated_text": format!("{}\n\nThe function subtracts instead of adding.", build_prompt(code))
        }])))
        .mount(&upstream)
        .await;

    let server = start_with_upstream(&upstream).await;
    let (status, body) = post_debug(&server, code).await;

    assert_eq!(status, 200);
    let result = body["debugResult"].as_str().unwrap();
    assert_eq!(result, "The function subtracts instead of adding.");
    assert!(!result.contains(PROMPT_PREAMBLE.trim_end()));
}

#[tokio::test]
async fn test_unrecognized_payload_is_dumped() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "warnings": ["cold start"] })))
        .mount(&upstream)
        .await;

    let server = start_with_upstream(&upstream).await;
    let (status, body) = post_debug(&server, "x").await;

    assert_eq!(status, 200);
    assert_eq!(
        body["debugResult"],
        "{\n  \"warnings\": [\n    \"cold start\"\n  ]\n}"
    );
}

#[tokio::test]
async fn test_empty_completion_returns_placeholder() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generated_text": "   " })))
        .mount(&upstream)
        .await;

    let server = start_with_upstream(&upstream).await;
    let (status, body) = post_debug(&server, "x").await;

    assert_eq!(status, 200);
    assert_eq!(body["debugResult"], NO_ISSUES_PLACEHOLDER);
}

#[tokio::test]
async fn test_upstream_error_status_and_body_mirrored() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(json!({ "error": "Model is currently loading", "estimated_time": 20.0 })),
        )
        .mount(&upstream)
        .await;

    let server = start_with_upstream(&upstream).await;
    let (status, body) = post_debug(&server, "x").await;

    assert_eq!(status, 503);
    assert_eq!(body["error"], "Error from AI service");
    assert_eq!(body["details"]["error"], "Model is currently loading");
}

#[tokio::test]
async fn test_unreachable_upstream_is_service_unavailable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let provider =
        HuggingFaceProvider::new(format!("http://127.0.0.1:{port}/models/zephyr"), "hf_test")
            .unwrap();
    let server = TestServer::start(Arc::new(provider)).await;

    let (status, body) = post_debug(&server, "x").await;
    assert_eq!(status, 503);
    assert_eq!(
        body,
        json!({
            "error": "No response from AI service. Please try again later.",
            "details": "Request timeout or network issue"
        })
    );

    // Liveness does not depend on the upstream.
    let response = reqwest::get(server.url("/api/test")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Server is running properly!" }));
}
