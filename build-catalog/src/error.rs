use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::filename::FilenameError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Filename(#[from] FilenameError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Filename(e) => tracing::error!("Malformed build filename: {e}"),
            AppError::Template(e) => tracing::error!("Failed to render page: {e:#}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:#}"),
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response()
    }
}
