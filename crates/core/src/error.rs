use thiserror::Error;

use crate::model::CategoryId;

/// Outcome of a listing request that produced no visible window.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListError {
    /// The page is past the end, or the category holds no questions.
    #[error("no questions on the requested page")]
    NotFound,
}

/// Failures of a quiz turn. Pool exhaustion is not one of them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("category {0} does not exist")]
    InvalidCategory(CategoryId),
}
