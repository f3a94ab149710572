use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use foliochat_provider::{LlmProvider, LlmRequest, LlmResponse, LlmRole, StubProvider};
use foliochat_server::{create_router, AppState};
use tower::util::ServiceExt;

struct FailProvider;

#[async_trait]
impl LlmProvider for FailProvider {
    async fn chat(&self, _request: LlmRequest) -> anyhow::Result<LlmResponse> {
        Err(anyhow!("forced failure"))
    }
}

/// Captures the request it was handed, for asserting message construction.
#[derive(Default)]
struct RecordingProvider {
    seen: Mutex<Option<LlmRequest>>,
}

#[async_trait]
impl LlmProvider for RecordingProvider {
    async fn chat(&self, request: LlmRequest) -> anyhow::Result<LlmResponse> {
        *self.seen.lock().unwrap() = Some(request);
        Ok(LlmResponse {
            text: "recorded".into(),
        })
    }
}

fn post_chat(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_always_ok() {
    let app = create_router(AppState::new(Arc::new(StubProvider), "test-model"));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = create_router(AppState::new(Arc::new(StubProvider), "test-model"));
    let response = app
        .oneshot(post_chat(serde_json::json!({"message": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json, serde_json::json!({"error": "Empty message"}));
}

#[tokio::test]
async fn whitespace_only_message_is_rejected() {
    let app = create_router(AppState::new(Arc::new(StubProvider), "test-model"));
    let response = app
        .oneshot(post_chat(serde_json::json!({"message": "  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn valid_message_returns_reply() {
    let app = create_router(AppState::new(Arc::new(StubProvider), "test-model"));
    let response = app
        .oneshot(post_chat(serde_json::json!({"message": "Hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    let reply = json["reply"].as_str().unwrap();
    assert!(!reply.is_empty());
}

#[tokio::test]
async fn provider_failure_maps_to_server_error_with_details() {
    let app = create_router(AppState::new(Arc::new(FailProvider), "test-model"));
    let response = app
        .oneshot(post_chat(serde_json::json!({"message": "Hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Server error");
    assert_eq!(json["details"], "forced failure");
}

#[tokio::test]
async fn history_is_forwarded_between_system_prompt_and_final_turn() {
    let recorder = Arc::new(RecordingProvider::default());
    let app = create_router(AppState::new(recorder.clone(), "test-model"));

    let response = app
        .oneshot(post_chat(serde_json::json!({
            "message": "which stack?",
            "history": [
                {"role": "user", "content": "what do you build?"},
                {"role": "assistant", "content": "web things"}
            ]
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let seen = recorder.seen.lock().unwrap().take().unwrap();
    assert_eq!(seen.model, "test-model");
    assert!(seen.system.as_deref().unwrap().contains("portfolio"));

    let roles: Vec<LlmRole> = seen.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![LlmRole::User, LlmRole::Assistant, LlmRole::User]);
    assert_eq!(seen.messages[0].content, "what do you build?");
    assert_eq!(seen.messages[2].content, "which stack?");
}

#[tokio::test]
async fn history_is_optional() {
    let recorder = Arc::new(RecordingProvider::default());
    let app = create_router(AppState::new(recorder.clone(), "test-model"));

    let response = app
        .oneshot(post_chat(serde_json::json!({"message": "Hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let seen = recorder.seen.lock().unwrap().take().unwrap();
    assert_eq!(seen.messages.len(), 1);
    assert_eq!(seen.messages[0].role, LlmRole::User);
}
