use crate::error::ServerResult;
use crate::state::ServiceContext;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(json!({
        "status": "healthy",
        "service": "purchase-predict",
        "uptime_seconds": uptime,
    }))
}

/// Readiness check endpoint
///
/// The context is only constructed once every startup artifact loaded, so
/// reaching this handler with state attached means the service is ready.
pub async fn readiness_check(
    State(state): State<Arc<ServiceContext>>,
) -> ServerResult<impl IntoResponse> {
    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Ok(Json(json!({
        "status": "ready",
        "service": "purchase-predict",
        "uptime_seconds": uptime,
        "components": {
            "engine": "ready",
            "vocabulary": state.vocab.len(),
            "email_classes": state.email_labels.len(),
            "name_classes": state.name_labels.len(),
        }
    })))
}
