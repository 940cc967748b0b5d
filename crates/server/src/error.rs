use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {msg}");
                (StatusCode::NOT_FOUND, msg.clone())
            }
        };

        // Same body shape for every error: {"detail": "message"}
        (status, Json(json!({ "detail": message }))).into_response()
    }
}
