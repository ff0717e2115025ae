#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod quiz_service;

pub use app_services::TriviaServices;
pub use catalog_service::{CatalogOverview, CatalogService};
pub use error::{AppServicesError, CatalogServiceError, QuizServiceError};
pub use quiz_service::QuizService;
