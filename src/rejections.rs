use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level failures, rendered as a status code plus a JSON
/// `{ "error": message }` payload.
#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    Input(&'static str),
    NotFound(&'static str),
    Unauthorized,
    Forbidden(&'static str),
    Conflict(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.to_string()),
            AppError::Input(m) => (StatusCode::BAD_REQUEST, m.to_string()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m.to_string()),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Authentication failed".to_string())
            }
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, m.to_string()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m),
        };

        (code, Json(json!({ "error": message }))).into_response()
    }
}

/// Shorthand for converting fallible store/tree results into rejections,
/// logging the underlying cause on the way.
pub trait ResultExt<T> {
    fn reject(self, context: &'static str) -> Result<T, AppError>;
    fn reject_input(self, context: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{context}: {e}");
            AppError::Internal(context)
        })
    }

    fn reject_input(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{context}: {e}");
            AppError::Input(context)
        })
    }
}
