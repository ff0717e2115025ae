use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trivia_core::model::{Category, CategoryId, Question, QuestionId, ValidatedQuestion};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a question whose id the store assigns.
#[derive(Debug, Clone)]
pub struct NewQuestionRecord {
    pub question: String,
    pub answer: String,
    pub difficulty: u8,
    pub category: CategoryId,
}

impl NewQuestionRecord {
    #[must_use]
    pub fn from_validated(question: &ValidatedQuestion) -> Self {
        Self {
            question: question.question.clone(),
            answer: question.answer.clone(),
            difficulty: question.difficulty.value(),
            category: question.category,
        }
    }
}

/// Repository contract for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist or rename a category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the category cannot be stored.
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError>;

    /// Fetch a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError>;

    /// All categories ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;
}

/// Repository contract for questions. Every list is ordered by ID ascending.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a new question and return its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError>;

    /// Persist a question under its own ID, replacing any existing row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Fetch a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn question_exists(&self, id: QuestionId) -> Result<bool, StorageError>;

    /// Delete a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no such question exists.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError>;
}

#[derive(Default)]
struct Catalogue {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    // Highest id ever stored; deleted ids are not handed out again.
    last_question_id: u64,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<Catalogue>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Catalogue::default())),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Catalogue) -> T) -> Result<T, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(f(&guard))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Catalogue) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        f(&mut guard)
    }

    fn collect_where(&self, pred: impl Fn(&Question) -> bool) -> Result<Vec<Question>, StorageError> {
        self.read(|c| c.questions.values().filter(|q| pred(q)).cloned().collect())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        self.write(|c| {
            c.categories.insert(category.id(), category.clone());
            Ok(())
        })
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        self.read(|c| c.categories.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        self.read(|c| c.categories.values().cloned().collect())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        self.write(|c| {
            if !c.categories.contains_key(&record.category) {
                return Err(StorageError::Conflict);
            }
            let next = c
                .last_question_id
                .checked_add(1)
                .ok_or(StorageError::Conflict)?;
            let id = QuestionId::new(next);
            let question = Question::from_persisted(
                id,
                record.question,
                record.answer,
                i64::from(record.difficulty),
                record.category,
            )
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
            c.questions.insert(id, question);
            c.last_question_id = next;
            Ok(id)
        })
    }

    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        self.write(|c| {
            c.last_question_id = c.last_question_id.max(question.id().value());
            c.questions.insert(question.id(), question.clone());
            Ok(())
        })
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        self.read(|c| c.questions.get(&id).cloned())
    }

    async fn question_exists(&self, id: QuestionId) -> Result<bool, StorageError> {
        self.read(|c| c.questions.contains_key(&id))
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        self.write(|c| {
            c.questions
                .remove(&id)
                .map(|_| ())
                .ok_or(StorageError::NotFound)
        })
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        self.collect_where(|_| true)
    }

    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError> {
        self.collect_where(|q| q.category() == category)
    }
}

/// Aggregates category and question repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub categories: Arc<dyn CategoryRepository>,
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo);
        Self {
            categories,
            questions,
        }
    }

    /// Upsert the sample catalogue. Safe to run repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any row cannot be stored.
    pub async fn seed_sample_catalog(&self) -> Result<(), StorageError> {
        for category in crate::fixtures::sample_categories() {
            self.categories.upsert_category(&category).await?;
        }
        for question in crate::fixtures::sample_questions() {
            self.questions.upsert_question(&question).await?;
        }
        Ok(())
    }
}
