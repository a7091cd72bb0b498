//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all endpoints
//! - Middleware stack (logging, compression, CORS, timeout)
//! - Graceful shutdown handling

use crate::config::ServiceConfig;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, health, not_found, predict};
use crate::state::ServiceContext;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Routes:
/// - `GET /` - service info
/// - `GET /health`, `GET /ready` - probes
/// - `POST /predict_Email` - the prediction endpoint
///
/// Middleware stack (applied in reverse order):
/// 1. Request ID tracking
/// 2. Request logging
/// 3. Timeout handling
/// 4. Compression
/// 5. CORS
pub fn build_router(state: Arc<ServiceContext>) -> Router {
    // CORS layer
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/predict_Email", post(predict::predict))
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(state.config.timeout_secs),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(request_id))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP inference server
///
/// Loads every startup artifact (model, vocabulary, label files), builds the
/// router, binds the configured TCP address, and serves until SIGTERM or
/// Ctrl+C. Any artifact load failure aborts startup; there is no
/// partial-service mode.
pub async fn start_server(config: ServiceConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    // Load the service context (model, vocabulary, labels)
    let state = Arc::new(ServiceContext::new(config.clone())?);

    // Build router
    let app = build_router(state);

    // Parse bind address
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting purchase-predict server on {} (model: {})",
        addr,
        config.model_path
    );
    tracing::info!(
        "Timeout: {}s, CORS: {}, sequence length: {}",
        config.timeout_secs,
        config.enable_cors,
        config.sequence_length
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
