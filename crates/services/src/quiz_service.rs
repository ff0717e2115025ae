use std::sync::Arc;

use rand::Rng;
use storage::repository::{CategoryRepository, QuestionRepository};
use trivia_core::model::{Category, Question};
use trivia_core::quiz::{CategoryFilter, QuizTurn, next_question};

use crate::error::QuizServiceError;

/// Serves quiz turns from a fresh catalogue snapshot on every call.
#[derive(Clone)]
pub struct QuizService {
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuizService {
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

    /// Next unseen question using the thread-local generator.
    ///
    /// `Ok(None)` means every candidate has been served.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for an unknown category.
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn next_question(
        &self,
        turn: &QuizTurn,
    ) -> Result<Option<Question>, QuizServiceError> {
        let (questions, categories) = self.snapshot(turn.category()).await?;
        let next = next_question(&questions, &categories, turn, &mut rand::rng())?;
        log_turn(turn, next.as_ref());
        Ok(next)
    }

    /// Same as [`Self::next_question`] with a caller-supplied generator.
    ///
    /// # Errors
    ///
    /// See [`Self::next_question`].
    pub async fn next_question_with<R: Rng + Send + ?Sized>(
        &self,
        turn: &QuizTurn,
        rng: &mut R,
    ) -> Result<Option<Question>, QuizServiceError> {
        let (questions, categories) = self.snapshot(turn.category()).await?;
        let next = next_question(&questions, &categories, turn, rng)?;
        log_turn(turn, next.as_ref());
        Ok(next)
    }

    async fn snapshot(
        &self,
        filter: CategoryFilter,
    ) -> Result<(Vec<Question>, Vec<Category>), QuizServiceError> {
        // Categories first: one removed between the reads then looks exhausted
        // instead of unknown.
        let categories = self.categories.list_categories().await?;
        let questions = match filter {
            CategoryFilter::All => self.questions.list_questions().await?,
            CategoryFilter::Category(id) => self.questions.questions_in_category(id).await?,
        };
        Ok((questions, categories))
    }
}

fn log_turn(turn: &QuizTurn, next: Option<&Question>) {
    match next {
        Some(q) => tracing::debug!(
            category = ?turn.category(),
            previous = turn.previous_ids().len(),
            served = %q.id(),
            "quiz turn"
        ),
        None => tracing::debug!(
            category = ?turn.category(),
            previous = turn.previous_ids().len(),
            "quiz exhausted"
        ),
    }
}
