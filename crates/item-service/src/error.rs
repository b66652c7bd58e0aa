// File: src/error.rs
// Purpose: Request failures that are not validation errors, rendered as HTML

use crate::forms::FormError;
use crate::repository::RepositoryError;
use crate::response::HtmlPage;
use crate::views;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("item {0} not found")]
    NotFound(i64),

    #[error("item not found")]
    InvalidId,

    #[error("validated form could not be mapped to an item: {0}")]
    Form(#[from] FormError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => AppError::NotFound(id),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::InvalidId => StatusCode::NOT_FOUND,
            AppError::Form(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let markup = if status == StatusCode::NOT_FOUND {
            views::not_found_page(&self.to_string())
        } else {
            error!(error = %self, "request failed");
            views::error_page("Something went wrong while handling the request.")
        };
        HtmlPage::new(markup).status(status).into_response()
    }
}
