//! Inference client tests against an in-process fake of the Hugging Face API

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use tripmind::config::AssistantConfig;
use tripmind::{HuggingFaceClient, TextGenerator, TripMindError};

const API_KEY: &str = "hf_test_key";

#[derive(Default)]
struct FakeInference {
    last_body: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
}

type Shared = Arc<FakeInference>;

async fn generate(
    State(state): State<Shared>,
    Path(model): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    *state.last_authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_body.lock().unwrap() = Some(body);

    match model.as_str() {
        "warm" => Json(json!([{"generated_text": "  ✈ Flight: take the morning departure.  "}]))
            .into_response(),
        "cold" => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "Model is currently loading", "estimated_time": 20.0})),
        )
            .into_response(),
        _ => (StatusCode::BAD_REQUEST, "bad").into_response(),
    }
}

async fn spawn(state: Shared) -> String {
    let app = Router::new()
        .route("/models/test/{model}", post(generate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/models")
}

fn client(base_url: &str, model: &str) -> HuggingFaceClient {
    HuggingFaceClient::new(&AssistantConfig {
        api_key: Some(API_KEY.to_string()),
        model: format!("test/{model}"),
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        ..AssistantConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_generation_is_trimmed_and_request_is_well_formed() {
    let state = Shared::default();
    let base_url = spawn(Arc::clone(&state)).await;

    let text = client(&base_url, "warm").generate("Plan my trip").await.unwrap();
    assert_eq!(text, "✈ Flight: take the morning departure.");

    assert_eq!(
        state.last_authorization.lock().unwrap().as_deref(),
        Some(format!("Bearer {API_KEY}").as_str())
    );

    let body = state.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["inputs"], "Plan my trip");
    assert_eq!(body["parameters"]["return_full_text"], false);
    assert_eq!(body["parameters"]["max_new_tokens"], 400);
    assert_eq!(body["parameters"]["temperature"], 0.6);
}

#[tokio::test]
async fn test_service_unavailable_is_cold_start() {
    let base_url = spawn(Shared::default()).await;

    let err = client(&base_url, "cold").generate("Plan my trip").await.unwrap_err();
    assert!(matches!(err, TripMindError::AiColdStart), "{err}");
}

#[tokio::test]
async fn test_other_failures_are_ai_errors_with_status() {
    let base_url = spawn(Shared::default()).await;

    let err = client(&base_url, "broken").generate("Plan my trip").await.unwrap_err();
    match err {
        TripMindError::Ai { message } => {
            assert!(message.contains("400"), "{message}");
            assert!(message.contains("bad"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
