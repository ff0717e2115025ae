//! JSON request and response shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use services::CatalogOverview;
use trivia_core::filter::QuestionListing;
use trivia_core::model::{Category, CategoryId, Question, QuestionDraft, QuestionId};
use trivia_core::quiz::{CategoryFilter, QuizTurn};

use crate::error::ApiError;

/// A number that clients may send either as JSON number or as numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(i64),
    Text(String),
}

impl LooseNumber {
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => u64::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct QuestionBody {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub category: u64,
    pub difficulty: u8,
}

impl From<&Question> for QuestionBody {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id().value(),
            question: q.question().to_owned(),
            answer: q.answer().to_owned(),
            category: q.category().value(),
            difficulty: q.difficulty().value(),
        }
    }
}

fn category_map(categories: &[Category]) -> BTreeMap<u64, String> {
    categories
        .iter()
        .map(|c| (c.id().value(), c.name().as_str().to_owned()))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<u64, String>,
}

impl CategoriesResponse {
    #[must_use]
    pub fn new(categories: &[Category]) -> Self {
        Self {
            success: true,
            categories: category_map(categories),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionBody>,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<u64, String>>,
    pub current_category: Option<u64>,
}

impl From<QuestionListing> for QuestionsResponse {
    fn from(listing: QuestionListing) -> Self {
        Self {
            success: true,
            questions: listing.questions.iter().map(QuestionBody::from).collect(),
            total_questions: listing.total_questions,
            categories: None,
            current_category: listing.current_category.map(|c| c.value()),
        }
    }
}

impl From<CatalogOverview> for QuestionsResponse {
    fn from(overview: CatalogOverview) -> Self {
        Self {
            categories: Some(category_map(&overview.categories)),
            ..Self::from(overview.listing)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: u64,
}

impl CreatedResponse {
    #[must_use]
    pub fn new(id: QuestionId) -> Self {
        Self {
            success: true,
            created: id.value(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: u64,
}

impl DeletedResponse {
    #[must_use]
    pub fn new(id: QuestionId) -> Self {
        Self {
            success: true,
            deleted: id.value(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<QuestionBody>,
}

impl QuizResponse {
    #[must_use]
    pub fn new(question: Option<&Question>) -> Self {
        Self {
            success: true,
            question: question.map(QuestionBody::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Body of `POST /questions`: either a search or a new question.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionPayload {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<LooseNumber>,
    pub category: Option<LooseNumber>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl QuestionPayload {
    /// Missing or non-numeric fields become values the draft validation rejects.
    #[must_use]
    pub fn into_draft(self) -> QuestionDraft {
        QuestionDraft {
            question: self.question.unwrap_or_default(),
            answer: self.answer.unwrap_or_default(),
            difficulty: self
                .difficulty
                .as_ref()
                .and_then(LooseNumber::as_i64)
                .unwrap_or(0),
            category: self
                .category
                .as_ref()
                .and_then(LooseNumber::as_u64)
                .map(CategoryId::new),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategoryPayload {
    pub id: LooseNumber,
}

#[derive(Debug, Deserialize)]
pub struct QuizPayload {
    #[serde(default)]
    pub previous_questions: Vec<u64>,
    pub quiz_category: QuizCategoryPayload,
}

impl TryFrom<QuizPayload> for QuizTurn {
    type Error = ApiError;

    fn try_from(payload: QuizPayload) -> Result<Self, Self::Error> {
        let raw = payload
            .quiz_category
            .id
            .as_u64()
            .ok_or(ApiError::BadRequest)?;
        Ok(QuizTurn::new(
            CategoryFilter::from_raw(raw),
            payload.previous_questions.into_iter().map(QuestionId::new),
        ))
    }
}
