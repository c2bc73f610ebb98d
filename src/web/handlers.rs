//! # Handlers HTTP
//!
//! A classificação é CPU pura, então roda em `spawn_blocking` para não
//! ocupar as threads do runtime. Lotes usam rayon dentro da mesma task.
//!
//! | Rota | Handler |
//! |------|---------|
//! | `POST /preprocess` | [`preprocess`] |
//! | `POST /webhook` | [`webhook`] |
//! | `POST /classify/batch` | [`classify_batch`] |
//! | `GET /health` | [`health`] |
//! | `GET /metrics` | [`metrics`] |
//! | `GET /lemmatizer/stats` | [`lemmatizer_stats`] |

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::task::JoinError;
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::analyzer::Analysis;
use crate::core::{Category, Language, RequestContext};
use crate::metrics::MetricsSnapshot;
use crate::nlu::lemmatizer::LemmatizerStats;
use crate::payload::{ChatPayload, HistoryTurn};

/// Máximo de mensagens por chamada a `/classify/batch`.
pub const MAX_BATCH: usize = 1000;

/// Campos da resposta que um campo extra do corpo não pode sobrescrever.
const RESERVED: &[&str] = &[
    "message",
    "normalized_text",
    "lemmatized_text",
    "language",
    "classification",
    "payload",
    "cache_hit",
    "latency_ms",
    "error",
    "request_id",
    "received_at",
    "from",
];

// ─── Tipos de requisição/resposta ────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PreprocessRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub ctx: RequestContext,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    /// Campos desconhecidos, devolvidos intactos na resposta.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct ClassificationView {
    pub bucket: Category,
    pub reasons: Vec<String>,
    pub scope: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreprocessResponse {
    pub message: String,
    pub normalized_text: String,
    pub lemmatized_text: String,
    pub language: Language,
    pub classification: ClassificationView,
    pub payload: ChatPayload,
    pub cache_hit: bool,
    pub latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub request_id: Uuid,
    pub received_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(flatten)]
    pub result: PreprocessResponse,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub messages: Vec<String>,
    #[serde(default)]
    pub ctx: RequestContext,
}

#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub message: String,
    pub bucket: Category,
    pub reasons: Vec<String>,
    pub scope: Vec<String>,
    pub cache_hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub count: usize,
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

// ─── Pipeline compartilhado ──────────────────────────────────────

async fn run(
    state: &AppState,
    message: String,
    ctx: RequestContext,
    history: Vec<HistoryTurn>,
    extra: Map<String, Value>,
) -> ApiResult<PreprocessResponse> {
    let analyzer = state.analyzer.clone();
    let task = tokio::task::spawn_blocking(move || {
        let analysis = analyzer.analyze(&message, &ctx);
        (analysis, ctx)
    })
    .await;
    let (analysis, ctx) = joined(state, task)?;

    record(state, &analysis);
    let payload = state
        .payload
        .build(&analysis.result, &analysis.message, &ctx, &history);
    Ok(into_response(analysis, payload, extra))
}

/// Falha da task bloqueante vira 500 e conta como erro nas métricas.
fn joined<T>(state: &AppState, result: Result<T, JoinError>) -> ApiResult<T> {
    result.map_err(|e| {
        state.metrics.record_error();
        ApiError::from(e)
    })
}

fn record(state: &AppState, analysis: &Analysis) {
    if analysis.is_empty_input() {
        state.metrics.record_error();
    } else {
        state.metrics.record(analysis.elapsed, analysis.cache_hit);
    }
}

fn into_response(analysis: Analysis, payload: ChatPayload, mut extra: Map<String, Value>) -> PreprocessResponse {
    extra.retain(|k, _| !RESERVED.contains(&k.as_str()));
    let Analysis {
        message,
        result,
        cache_hit,
        elapsed,
    } = analysis;
    PreprocessResponse {
        message: message.raw,
        normalized_text: message.normalized,
        lemmatized_text: message.lemmatized,
        language: message.language,
        classification: ClassificationView {
            bucket: result.category,
            reasons: result.reasons,
            scope: result.scope,
        },
        payload,
        cache_hit,
        latency_ms: elapsed.as_secs_f64() * 1000.0,
        error: result.error,
        extra,
    }
}

// ─── Handlers ────────────────────────────────────────────────────

/// POST `/preprocess`: classifica e monta o payload.
///
/// Corpo vazio (`{}`) é 400; `message` vazia devolve a sentinela
/// `EMPTY_INPUT` com status 200.
pub async fn preprocess(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<PreprocessResponse>> {
    let Json(body) = body?;
    let is_empty = body.as_object().map_or(true, Map::is_empty);
    if is_empty {
        state.metrics.record_error();
        return Err(ApiError::bad_request("corpo da requisição vazio"));
    }
    let req: PreprocessRequest =
        serde_json::from_value(body).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let response = run(&state, req.message, req.ctx, req.history, req.extra).await?;
    Ok(Json(response))
}

/// POST `/webhook`: mensagem de canal externo, sempre em português.
pub async fn webhook(
    State(state): State<AppState>,
    body: Result<Json<WebhookRequest>, JsonRejection>,
) -> ApiResult<Json<WebhookResponse>> {
    let Json(req) = body?;
    let request_id = Uuid::new_v4();
    let received_at = Utc::now();
    tracing::info!(%request_id, from = req.from.as_deref().unwrap_or("-"), "webhook recebido");

    let ctx = RequestContext {
        language: Some("pt".into()),
        temperature: Some(0.3),
        model: None,
    };
    let result = run(&state, req.message, ctx, Vec::new(), Map::new()).await?;
    Ok(Json(WebhookResponse {
        request_id,
        received_at,
        from: req.from,
        result,
    }))
}

/// POST `/classify/batch`: classificação em paralelo, sem payload.
pub async fn classify_batch(
    State(state): State<AppState>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> ApiResult<Json<BatchResponse>> {
    let Json(req) = body?;
    if req.messages.len() > MAX_BATCH {
        return Err(ApiError::bad_request(format!(
            "lote com {} mensagens excede o máximo de {MAX_BATCH}",
            req.messages.len()
        )));
    }

    let analyzer = state.analyzer.clone();
    let batch = tokio::task::spawn_blocking(move || analyzer.classify_batch(&req.messages, &req.ctx)).await;
    let analyses = joined(&state, batch)?;

    let results: Vec<BatchItem> = analyses
        .into_iter()
        .map(|a| {
            record(&state, &a);
            BatchItem {
                message: a.message.raw,
                bucket: a.result.category,
                reasons: a.result.reasons,
                scope: a.result.scope,
                cache_hit: a.cache_hit,
                error: a.result.error,
            }
        })
        .collect();
    Ok(Json(BatchResponse {
        count: results.len(),
        results,
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot(&state.analyzer))
}

pub async fn lemmatizer_stats(State(state): State<AppState>) -> Json<LemmatizerStats> {
    Json(state.analyzer.lemmatizer().stats())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::analyzer::Analyzer;
    use crate::config::Config;
    use crate::payload::PayloadBuilder;

    fn state(dir: &tempfile::TempDir) -> AppState {
        let mut config = Config::default();
        config.lemmatizer.learned_path = dir.path().join("learned.json");
        AppState::new(Arc::new(Analyzer::init(&config)), PayloadBuilder::from(&config.payload))
    }

    #[tokio::test]
    async fn panicked_task_counts_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        let failed = tokio::task::spawn_blocking(|| -> u32 { panic!("falha simulada") }).await;

        let err = joined(&state, failed).unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.metrics.errors(), 1);
    }

    #[tokio::test]
    async fn finished_task_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        let done = tokio::task::spawn_blocking(|| 7u32).await;

        assert_eq!(joined(&state, done).unwrap(), 7);
        assert_eq!(state.metrics.errors(), 0);
    }
}
