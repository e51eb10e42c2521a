use musilingo_ai::services::gemini::{ChatModel, Content, GeminiClient, ModelError};
use musilingo_ai::services::persona::Persona;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

/// Start a fake provider on an ephemeral port and return its base URL.
async fn fake_provider(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route(
            "/v1beta/models/{action}",
            post(
                move |State(captured): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        let key = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        captured.requests.lock().unwrap().push((key, body));
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), captured)
}

fn client(base_url: &str) -> GeminiClient {
    GeminiClient::new("test-key", "gemini-1.5-flash-latest", base_url, Persona::default())
}

#[tokio::test]
async fn test_sends_persona_history_and_turn() {
    let (base, captured) = fake_provider(
        StatusCode::OK,
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": "Claro! 🎼"}]}, "finishReason": "STOP"}]}),
    )
    .await;

    let reply = client(&base)
        .send_message(
            vec![Content::new("user", "Oi"), Content::new("model", "Olá!")],
            Content::new("user", "Escala de Sol"),
        )
        .await
        .unwrap();
    assert_eq!(reply, "Claro! 🎼");

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (key, body) = &requests[0];
    assert_eq!(key.as_deref(), Some("test-key"));

    let contents = body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["parts"][0]["text"], "Escala de Sol");

    assert!(
        body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Cecília")
    );
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
    assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_provider_error_status_is_reported() {
    let (base, _) = fake_provider(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": {"message": "overloaded"}}),
    )
    .await;

    let err = client(&base)
        .send_message(vec![], Content::new("user", "Oi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_blocked_prompt_is_reported() {
    let (base, _) = fake_provider(
        StatusCode::OK,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}),
    )
    .await;

    let err = client(&base)
        .send_message(vec![], Content::new("user", "Oi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Blocked(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_a_request_error() {
    let err = client("http://127.0.0.1:1")
        .send_message(vec![], Content::new("user", "Oi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Request(_)));
}
