use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("answer text cannot be empty")]
    EmptyAnswer,

    #[error("difficulty must be between {min} and {max}, got {0}", min = Difficulty::MIN, max = Difficulty::MAX)]
    InvalidDifficulty(i64),

    #[error("category is required")]
    MissingCategory,
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Question difficulty, a small positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw difficulty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidDifficulty` outside `MIN..=MAX`.
    pub fn new(value: i64) -> Result<Self, QuestionError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(QuestionError::InvalidDifficulty(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated input for a new question, as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: Option<CategoryId>,
}

impl QuestionDraft {
    /// Check the draft and produce a question that only lacks an id.
    ///
    /// Text fields are trimmed; whitespace-only text is rejected.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` found.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }
        let answer = self.answer.trim();
        if answer.is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        let difficulty = Difficulty::new(self.difficulty)?;
        let category = self.category.ok_or(QuestionError::MissingCategory)?;

        Ok(ValidatedQuestion {
            question: question.to_owned(),
            answer: answer.to_owned(),
            difficulty,
            category,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    pub category: CategoryId,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

/// A catalogued quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    question: String,
    answer: String,
    difficulty: Difficulty,
    category: CategoryId,
}

impl Question {
    /// Rehydrate a question read back from storage.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted values no longer validate.
    pub fn from_persisted(
        id: QuestionId,
        question: String,
        answer: String,
        difficulty: i64,
        category: CategoryId,
    ) -> Result<Self, QuestionError> {
        let validated = QuestionDraft {
            question,
            answer,
            difficulty,
            category: Some(category),
        }
        .validate()?;
        Ok(validated.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
