use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors raised while loading startup artifacts (model, vocabulary, labels).
/// Any of these is fatal to the process; there is no partial-service mode.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid vocabulary artifact {path}: {reason}")]
    Vocab { path: String, reason: String },

    #[error("invalid model artifact {path}: {reason}")]
    Model { path: String, reason: String },

    #[error("label file {path} contains no labels")]
    EmptyLabels { path: String },
}

/// Errors raised by the inference engine adapter during a forward pass.
/// Fatal for the request, surfaced to the caller, never retried here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("inference failure: {0}")]
    Inference(#[from] ort::Error),

    #[error("engine lock poisoned")]
    Poisoned,
}

/// Error raised when a score vector cannot be paired with a label list.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("score vector length {scores} does not match label list length {labels}")]
    LengthMismatch { scores: usize, labels: usize },
}

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("ranking error: {0}")]
    Rank(#[from] RankError),

    #[error("internal server error: {0}")]
    Internal(String),

    #[error("not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MissingField(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Engine(_) | ServerError::Rank(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::MissingField(_) => "MISSING_FIELD",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Engine(_) => "ENGINE_ERROR",
            ServerError::Rank(_) => "SHAPE_MISMATCH",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}
