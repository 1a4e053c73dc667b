use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Request failures surfaced to API callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed or expired bearer token
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Caller lacks the required role
    #[error("{0}")]
    Forbidden(String),

    /// Identifier cannot even be checked against the store
    #[error("Invalid announcement ID")]
    InvalidIdentifier,

    /// Well-formed identifier, no matching record
    #[error("Announcement not found")]
    NotFound,

    /// Input fails field constraints
    #[error("{0}")]
    Validation(String),

    /// Store or other infrastructure failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InvalidIdentifier => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::InvalidIdentifier => "invalid_id",
            AppError::NotFound => "not_found",
            AppError::Validation(_) => "validation",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
