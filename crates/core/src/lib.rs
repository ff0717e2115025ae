#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod model;
pub mod paging;
pub mod quiz;

pub use error::{ListError, QuizError};
pub use filter::{ListRequest, QuestionFilter, QuestionListing, SearchTerm, list_questions};
pub use paging::{Page, PageWindow, QUESTIONS_PER_PAGE, paginate};
pub use quiz::{CategoryFilter, QuizTurn, next_question, unseen_ids};
