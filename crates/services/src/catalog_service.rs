use std::sync::Arc;

use storage::repository::{CategoryRepository, NewQuestionRecord, QuestionRepository, StorageError};
use trivia_core::filter::{ListRequest, QuestionFilter, QuestionListing, SearchTerm, list_questions};
use trivia_core::model::{Category, CategoryId, QuestionDraft, QuestionId};
use trivia_core::paging::Page;

use crate::error::CatalogServiceError;

/// A page of the unfiltered listing together with every category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOverview {
    pub listing: QuestionListing,
    pub categories: Vec<Category>,
}

/// Listing, search, creation and deletion over the catalogue store.
#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            categories,
            questions,
        }
    }

    /// All categories ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        Ok(self.categories.list_categories().await?)
    }

    /// Unfiltered listing for `page`, plus the category table.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Listing` when the page is empty.
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn list_questions(&self, page: Page) -> Result<CatalogOverview, CatalogServiceError> {
        let questions = self.questions.list_questions().await?;
        let listing = list_questions(&questions, &ListRequest::new(QuestionFilter::All, page))?;
        let categories = self.categories.list_categories().await?;
        tracing::debug!(
            page = page.number(),
            shown = listing.questions.len(),
            total = listing.total_questions,
            "listed questions"
        );
        Ok(CatalogOverview {
            listing,
            categories,
        })
    }

    /// Every question matching `term`. Never reports not-found.
    ///
    /// Matching runs on the full catalogue with Unicode case folding, so every
    /// backend agrees on the result.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn search_questions(
        &self,
        term: &SearchTerm,
    ) -> Result<QuestionListing, CatalogServiceError> {
        let questions = self.questions.list_questions().await?;
        let listing = list_questions(
            &questions,
            &ListRequest::new(QuestionFilter::Search(term.clone()), Page::FIRST),
        )?;
        tracing::debug!(term = term.as_str(), total = listing.total_questions, "searched questions");
        Ok(listing)
    }

    /// One page of a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Listing` when the page is empty, including
    /// when the category does not exist.
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn questions_by_category(
        &self,
        category: CategoryId,
        page: Page,
    ) -> Result<QuestionListing, CatalogServiceError> {
        let questions = self.questions.questions_in_category(category).await?;
        let listing = list_questions(
            &questions,
            &ListRequest::new(QuestionFilter::Category(category), page),
        )?;
        Ok(listing)
    }

    /// Validate and persist a new question.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Question` for validation failures.
    /// Returns `CatalogServiceError::UnknownCategory` if the category does not exist.
    /// Returns `CatalogServiceError::Storage` if persistence fails.
    pub async fn create_question(
        &self,
        draft: QuestionDraft,
    ) -> Result<QuestionId, CatalogServiceError> {
        let validated = draft.validate()?;
        if self.categories.get_category(validated.category).await?.is_none() {
            return Err(CatalogServiceError::UnknownCategory(validated.category));
        }

        let id = self
            .questions
            .insert_new_question(NewQuestionRecord::from_validated(&validated))
            .await?;
        tracing::info!(%id, category = %validated.category, "created question");
        Ok(id)
    }

    /// Delete a question and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage(StorageError::NotFound)` if it does not exist.
    pub async fn delete_question(&self, id: QuestionId) -> Result<QuestionId, CatalogServiceError> {
        if !self.questions.question_exists(id).await? {
            return Err(StorageError::NotFound.into());
        }
        self.questions.delete_question(id).await?;
        tracing::info!(%id, "deleted question");
        Ok(id)
    }
}
