use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use trivia_core::model::CategoryId;

use crate::AppState;
use crate::dto::{CategoriesResponse, PageQuery, QuestionsResponse};
use crate::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(category_questions))
}

#[tracing::instrument(skip(state))]
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.services.catalog().list_categories().await?;
    Ok(Json(CategoriesResponse::new(&categories)))
}

#[tracing::instrument(skip(state))]
async fn category_questions(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let Path(id) = id?;
    let page = super::questions::page_from(query);
    let listing = state
        .services
        .catalog()
        .questions_by_category(CategoryId::new(id), page)
        .await?;
    Ok(Json(listing.into()))
}
