//! Error → HTTP status mapping for the service surface.

use crate::error::{ClassificationError, EngineError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// Body is not a packet array, or the flow failed validation
    BadRequest(String),
    /// No model was loaded at startup
    ModelUnavailable(String),
    /// The loaded model failed to score
    Classification(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ModelUnavailable(msg) => {
                tracing::error!(error = %msg, "model unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Model not loaded. Check server logs.".to_string(),
                )
            }
            ApiError::Classification(msg) => {
                tracing::error!(error = %msg, "classification failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Classification error: {msg}"),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Flow(e) => ApiError::BadRequest(e.to_string()),
            EngineError::Classification(e @ ClassificationError::ModelNotLoaded { .. }) => {
                ApiError::ModelUnavailable(e.to_string())
            }
            EngineError::Classification(e) => ApiError::Classification(e.to_string()),
        }
    }
}
