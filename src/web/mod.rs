//! # Módulo Web — API JSON do Pré-processador
//!
//! Camada fina sobre o [`Analyzer`](crate::analyzer::Analyzer), construída
//! com **Axum** + **tower-http**.
//!
//! ## Arquitetura Web
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Cliente (chat / webhook de canal)                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Layers: CORS → Trace → x-process-time-ms                │
//! ├─────────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                               │
//! │  ├── POST /preprocess       → classificação + payload   │
//! │  ├── POST /webhook          → idem, ctx fixo pt / 0.3   │
//! │  ├── POST /classify/batch   → lote em paralelo (rayon)  │
//! │  ├── GET  /health           → liveness                  │
//! │  ├── GET  /metrics          → contadores + memória      │
//! │  └── GET  /lemmatizer/stats → dicionários e memo        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`) |
//! | [`handlers`] | Handlers Axum para cada rota |
//! | [`error`] | `ApiError` → resposta JSON |

pub mod error;
pub mod handlers;
pub mod state;

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

pub const PROCESS_TIME_HEADER: &str = "x-process-time-ms";

/// Cria o router Axum com todas as rotas e layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // ── Classificação ─────────────────────────────────────
        .route("/preprocess", post(handlers::preprocess))
        .route("/webhook", post(handlers::webhook))
        .route("/classify/batch", post(handlers::classify_batch))
        // ── Operação ──────────────────────────────────────────
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/lemmatizer/stats", get(handlers::lemmatizer_stats))
        .layer(middleware::from_fn(process_time))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Mede a requisição, loga e anexa o header de latência.
async fn process_time(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(req).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed_ms:.3}")) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms,
        "requisição concluída"
    );
    response
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analyzer::Analyzer;
    use crate::config::Config;
    use crate::nlu::scopes::{DRIVE, SHEETS};
    use crate::payload::PayloadBuilder;

    fn app(dir: &tempfile::TempDir) -> Router {
        let mut config = Config::default();
        config.lemmatizer.learned_path = dir.path().join("learned.json");
        let analyzer = Arc::new(Analyzer::init(&config));
        create_router(AppState::new(analyzer, PayloadBuilder::from(&config.payload)))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value, bool) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let has_timing = response.headers().contains_key(PROCESS_TIME_HEADER);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json, has_timing)
    }

    #[tokio::test]
    async fn preprocess_system_message() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body, timed) = send(
            app(&dir),
            "POST",
            "/preprocess",
            Some(json!({"message": "crie uma planilha", "user_id": "u-1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(timed);
        assert_eq!(body["classification"]["bucket"], "system");
        assert_eq!(body["classification"]["scope"], json!([SHEETS, DRIVE]));
        assert_eq!(body["normalized_text"], "crie uma planilha");
        assert_eq!(body["language"], "pt");
        assert_eq!(body["cache_hit"], false);
        assert_eq!(body["user_id"], "u-1");
        assert_eq!(body["payload"]["max_tokens"], 1200);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn preprocess_empty_body_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body, _) = send(app(&dir), "POST", "/preprocess", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn preprocess_empty_message_returns_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body, _) =
            send(app(&dir), "POST", "/preprocess", Some(json!({"message": "   "}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "EMPTY_INPUT");
        assert_eq!(body["classification"]["bucket"], "unclear");
        assert_eq!(body["payload"]["messages"][0]["role"], "assistant");
    }

    #[tokio::test]
    async fn webhook_adds_request_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body, _) = send(
            app(&dir),
            "POST",
            "/webhook",
            Some(json!({"from": "5511999999999", "message": "What is the meeting time?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["language"], "pt");
        assert_eq!(body["from"], "5511999999999");
        assert!(body["request_id"].as_str().is_some_and(|id| id.len() == 36));
        assert!(body["received_at"].is_string());
        assert!(body["payload"]["temperature"].as_f64().is_some_and(|t| t <= 0.3));
    }

    #[tokio::test]
    async fn batch_classifies_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body, _) = send(
            app(&dir),
            "POST",
            "/classify/batch",
            Some(json!({"messages": ["oi", "documento", ""]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["results"][0]["bucket"], "user");
        assert_eq!(body["results"][1]["bucket"], "unclear");
        assert_eq!(body["results"][2]["error"], "EMPTY_INPUT");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/classify/batch")
            .header("content-type", "application/json")
            .body(Body::from("{\"messages\": "))
            .unwrap();
        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_metrics_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let router = app(&dir);

        let (status, body, _) = send(router.clone(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        send(router.clone(), "POST", "/preprocess", Some(json!({"message": "oi"}))).await;
        send(router.clone(), "POST", "/preprocess", Some(json!({"message": "oi"}))).await;

        let (_, metrics, _) = send(router.clone(), "GET", "/metrics", None).await;
        assert_eq!(metrics["requests"], 2);
        assert_eq!(metrics["cache_hits"], 1);
        assert_eq!(metrics["cache_size"], 1);

        let (_, stats, _) = send(router, "GET", "/lemmatizer/stats", None).await;
        assert!(stats["static_forms"].as_u64().is_some_and(|n| n > 0));
    }
}
