use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use trivia_core::quiz::QuizTurn;

use crate::AppState;
use crate::dto::{QuizPayload, QuizResponse};
use crate::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}

/// `question` is `null` once the category is exhausted.
#[tracing::instrument(skip(state, payload))]
async fn next_question(
    State(state): State<AppState>,
    payload: Result<Json<QuizPayload>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(payload) = payload?;
    let turn = QuizTurn::try_from(payload)?;
    let next = state.services.quiz().next_question(&turn).await?;
    Ok(Json(QuizResponse::new(next.as_ref())))
}
