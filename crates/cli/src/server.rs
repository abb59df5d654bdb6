//! HTTP host for the handbook assistant.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/ask` | Answer `{ "query": string }` from the handbook |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! `/ask` responds with exactly one of: 200 `{ "answer": string }`,
//! 400 plain text for a missing query, 500 plain text when the completion
//! service fails. Bodies over [`MAX_ASK_BODY_BYTES`] are refused with 413
//! before the pipeline runs.

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use handbook_knowledge::{AskBody, AskRequest, AskResult, HandbookAssistant};
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

/// Largest accepted `/ask` request body.
pub const MAX_ASK_BODY_BYTES: usize = 64 * 1024;

/// Shared application state passed to route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    assistant: Arc<HandbookAssistant>,
}

/// Build the router with all routes attached.
pub fn router(assistant: Arc<HandbookAssistant>) -> Router {
    Router::new()
        .route("/ask", post(handle_ask))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_ASK_BODY_BYTES))
        .with_state(AppState { assistant })
}

/// Bind `bind_addr` and serve until Ctrl-C.
pub async fn run_server(bind_addr: &str, assistant: Arc<HandbookAssistant>) -> anyhow::Result<()> {
    let app = router(assistant);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Handbook assistant listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Handler for `POST /ask`.
///
/// The body is read raw so that a missing or malformed payload still gets the
/// fixed 400 text rather than an extractor rejection.
async fn handle_ask(State(state): State<AppState>, body: Bytes) -> Response {
    let span = tracing::info_span!("ask");

    async move {
        let request = AskRequest::from_json_slice(&body);
        let result = state.assistant.ask(&request).await;
        tracing::info!("Responding with status {}", result.status);
        ask_response(result)
    }
    .instrument(span)
    .await
}

/// Convert an [`AskResult`] into an HTTP response: JSON for answers,
/// plain text for the error reasons.
fn ask_response(result: AskResult) -> Response {
    let status =
        StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match result.body {
        body @ AskBody::Answer { .. } => (status, Json(body)).into_response(),
        AskBody::Text(text) => (status, text).into_response(),
    }
}

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
