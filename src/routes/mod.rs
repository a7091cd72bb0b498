//! API route handlers
//!
//! - `health`: Liveness and readiness probes
//! - `predict`: The prediction endpoint

pub mod health;
pub mod predict;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns service information including version and available endpoints.
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Purchase Predict",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/predict_Email",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
