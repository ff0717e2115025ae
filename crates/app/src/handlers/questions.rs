use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use trivia_core::filter::SearchTerm;
use trivia_core::model::QuestionId;
use trivia_core::paging::Page;

use crate::AppState;
use crate::dto::{
    CreatedResponse, DeletedResponse, PageQuery, QuestionPayload, QuestionsResponse, SearchPayload,
};
use crate::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
        .route("/search", post(search))
}

/// A malformed query string is treated like a missing one.
pub(crate) fn page_from(query: Result<Query<PageQuery>, QueryRejection>) -> Page {
    let raw = query.ok().and_then(|Query(q)| q.page);
    Page::from_query(raw.as_deref())
}

#[tracing::instrument(skip(state))]
async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let overview = state.services.catalog().list_questions(page_from(query)).await?;
    Ok(Json(overview.into()))
}

#[tracing::instrument(skip(state, payload))]
async fn create_or_search(
    State(state): State<AppState>,
    payload: Result<Json<QuestionPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let catalog = state.services.catalog();

    if let Some(term) = payload.search_term.as_deref().and_then(SearchTerm::new) {
        let listing = catalog.search_questions(&term).await?;
        return Ok(Json(QuestionsResponse::from(listing)).into_response());
    }

    let id = catalog.create_question(payload.into_draft()).await?;
    Ok(Json(CreatedResponse::new(id)).into_response())
}

#[tracing::instrument(skip(state, payload))]
async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchPayload>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let Json(payload) = payload?;
    let term = payload
        .search_term
        .as_deref()
        .and_then(SearchTerm::new)
        .ok_or(ApiError::BadRequest)?;
    let listing = state.services.catalog().search_questions(&term).await?;
    Ok(Json(listing.into()))
}

#[tracing::instrument(skip(state))]
async fn delete_question(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = id?;
    let deleted = state
        .services
        .catalog()
        .delete_question(QuestionId::new(id))
        .await?;
    Ok(Json(DeletedResponse::new(deleted)))
}
