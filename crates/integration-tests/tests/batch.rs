mod harness;

use axum::http::StatusCode;
use harness::config::ConfigBuilder;
use harness::mock_llm::{MockLlm, MockReply};
use harness::server::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn batch_returns_trimmed_completion() {
    let mock = MockLlm::scripted([MockReply::text("  \"Nicolas Cage is an American actor.\"  ")])
        .await
        .unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .post("/inference/batch", json!({"user_prompt": "Who is Nicolas Cage?", "max_tokens": 64}))
        .await;

    assert_eq!(resp.status(), 200);
    let answer: String = resp.json().await.unwrap();
    assert_eq!(answer, "Nicolas Cage is an American actor.");

    let request = &mock.requests()[0];
    assert_eq!(request["model"], "mock-model");
    assert_eq!(request["max_completion_tokens"], 64);
    assert_eq!(request["messages"][0]["role"], "system");
    assert_eq!(request["messages"][0]["content"], "You are a helpful AI assistant.");
    assert_eq!(request["messages"][1]["content"], "Who is Nicolas Cage?");
    assert!(request.get("tools").is_none());
}

#[tokio::test]
async fn batch_applies_defaults_to_empty_body() {
    let mock = MockLlm::start().await.unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.post("/inference/batch", json!({})).await;

    assert_eq!(resp.status(), 200);
    let request = &mock.requests()[0];
    assert_eq!(request["messages"][1]["content"], "Tell me about Nicolas Cage.");
    assert_eq!(request["max_completion_tokens"], 128);
}

#[tokio::test]
async fn batch_clamps_max_tokens_hint() {
    let mock = MockLlm::start().await.unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    server.post("/inference/batch", json!({"max_tokens": 10_000})).await;

    assert_eq!(mock.requests()[0]["max_completion_tokens"], 768);
}

#[tokio::test]
async fn batch_enforces_output_budget() {
    let mock = MockLlm::scripted([MockReply::text("one two three four five six")]).await.unwrap();
    let config = ConfigBuilder::new()
        .with_llm(&mock.base_url())
        .with_output_max_tokens(4)
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.post("/inference/batch", json!({})).await;

    let answer: String = resp.json().await.unwrap();
    assert_eq!(answer, "one two three four");
}

#[tokio::test]
async fn batch_without_choices_is_not_found() {
    let mock = MockLlm::scripted([MockReply::NoChoices]).await.unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.post("/inference/batch", json!({})).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["type"], "not_found_error");
    assert_eq!(mock.completion_count(), 1);
}

#[tokio::test]
async fn provider_failure_is_unavailable_and_not_retried() {
    let mock = MockLlm::scripted([MockReply::Fail(StatusCode::INTERNAL_SERVER_ERROR)])
        .await
        .unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.post("/inference/batch", json!({})).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["type"], "provider_unavailable");
    assert_eq!(mock.completion_count(), 1);
}

#[tokio::test]
async fn unreachable_provider_is_unavailable() {
    let config = ConfigBuilder::new().with_llm("http://127.0.0.1:9/v1").build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.post("/inference/batch", json!({})).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn malformed_body_is_json_bad_request() {
    let mock = MockLlm::start().await.unwrap();
    let config = ConfigBuilder::new().with_llm(&mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.post("/inference/batch", json!({"max_tokens": -1})).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("max_tokens"));
    assert_eq!(mock.completion_count(), 0);
}
