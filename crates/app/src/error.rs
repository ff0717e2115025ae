use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use services::{CatalogServiceError, QuizServiceError};
use storage::repository::StorageError;
use thiserror::Error;
use trivia_core::{ListError, QuizError};

use crate::dto::ErrorBody;

/// Every failure the API reports, rendered as `{success, error, message}`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable,
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "resource not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Unprocessable => "unprocessable",
            Self::Internal => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

fn storage_failure(err: &StorageError) -> ApiError {
    match err {
        StorageError::NotFound => ApiError::NotFound,
        other => {
            tracing::error!(error = %other, "storage failure");
            ApiError::Internal
        }
    }
}

impl From<CatalogServiceError> for ApiError {
    fn from(err: CatalogServiceError) -> Self {
        match err {
            CatalogServiceError::Listing(ListError::NotFound) => Self::NotFound,
            CatalogServiceError::Question(_) | CatalogServiceError::UnknownCategory(_) => {
                Self::Unprocessable
            }
            CatalogServiceError::Storage(e) => storage_failure(&e),
            other => {
                tracing::error!(error = %other, "unhandled catalogue error");
                Self::Internal
            }
        }
    }
}

impl From<QuizServiceError> for ApiError {
    fn from(err: QuizServiceError) -> Self {
        match err {
            QuizServiceError::Quiz(QuizError::InvalidCategory(_)) => Self::BadRequest,
            QuizServiceError::Storage(e) => storage_failure(&e),
            other => {
                tracing::error!(error = %other, "unhandled quiz error");
                Self::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        Self::BadRequest
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected path");
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{CategoryId, QuestionError};

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (
                ApiError::from(CatalogServiceError::Listing(ListError::NotFound)),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(CatalogServiceError::Question(QuestionError::EmptyAnswer)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(CatalogServiceError::UnknownCategory(CategoryId::new(9))),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(CatalogServiceError::Storage(StorageError::NotFound)),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(CatalogServiceError::Storage(StorageError::Connection(
                    "down".into(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(QuizServiceError::Quiz(QuizError::InvalidCategory(
                    CategoryId::new(9),
                ))),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err:?}");
        }
    }

    #[test]
    fn message_matches_display() {
        for err in [
            ApiError::BadRequest,
            ApiError::NotFound,
            ApiError::MethodNotAllowed,
            ApiError::Unprocessable,
            ApiError::Internal,
        ] {
            assert_eq!(err.message(), err.to_string());
        }
    }
}
