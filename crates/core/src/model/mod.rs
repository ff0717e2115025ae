mod category;
mod ids;
mod question;

pub use category::{Category, CategoryError, CategoryName};
pub use ids::{CategoryId, QuestionId};
pub use question::{Difficulty, Question, QuestionDraft, QuestionError, ValidatedQuestion};
