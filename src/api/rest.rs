// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// JSON endpoints live under `/api/v1/`; the HTML dashboard is served at `/`.
// Every request runs its own fetch cycle; nothing is cached between requests.
//
// CORS is configured permissively so that any static front end can read the
// JSON report.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::app_state::AppState;
use crate::presentation::{render_html, render_unavailable_html};
use crate::signals::RulePolicy;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(dashboard))
        .route("/api/v1/health", get(health))
        .route("/api/v1/signal", get(signal))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
    rules: RulePolicy,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
        rules: state.config.rules,
    })
}

// =============================================================================
// Signal report (JSON)
// =============================================================================

async fn signal(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.run_cycle().await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            error!(error = %e, "fetch cycle failed");
            let body = serde_json::json!({ "error": "data unavailable" });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

// =============================================================================
// Dashboard (HTML)
// =============================================================================

async fn dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.run_cycle().await {
        Ok(report) => Html(render_html(&report)).into_response(),
        Err(e) => {
            error!(error = %e, "fetch cycle failed");
            (StatusCode::SERVICE_UNAVAILABLE, Html(render_unavailable_html())).into_response()
        }
    }
}
