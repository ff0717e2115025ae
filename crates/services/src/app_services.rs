use std::sync::Arc;

use storage::repository::Storage;

use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::quiz_service::QuizService;

/// Assembles the services an API layer needs from one `Storage`.
#[derive(Clone)]
pub struct TriviaServices {
    catalog: Arc<CatalogService>,
    quiz: Arc<QuizService>,
}

impl TriviaServices {
    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&storage.categories),
            Arc::clone(&storage.questions),
        ));
        let quiz = Arc::new(QuizService::new(
            Arc::clone(&storage.categories),
            Arc::clone(&storage.questions),
        ));
        Self { catalog, quiz }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage))
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
