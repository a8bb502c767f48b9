//! HTTP-facing errors and how each one is rendered.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::store::StoreError;
use crate::views;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("computer {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg.clone()),
            AppError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "Computer not found",
                format!("There is no computer with id {id}."),
            ),
            AppError::Store(StoreError::Constraint(detail)) => {
                tracing::warn!(%detail, "Write rejected by database constraint");
                (
                    StatusCode::BAD_REQUEST,
                    "Bad request",
                    "The submitted data was rejected. Check the selected company and try again."
                        .to_string(),
                )
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                    "Something went wrong while talking to the database.".to_string(),
                )
            }
        };

        (status, Html(views::error_page(title, &message))).into_response()
    }
}
