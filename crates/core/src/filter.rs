//! Question listing: unfiltered, search and category modes.
//!
//! Listing and category modes are paginated and report an empty window as
//! [`ListError::NotFound`]. Search mode returns every match unpaginated and
//! never fails.

use crate::error::ListError;
use crate::model::{CategoryId, Question};
use crate::paging::{Page, QUESTIONS_PER_PAGE, paginate};

/// Case-insensitive substring needle. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Returns `None` for an empty term, which callers treat as "no search".
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return None;
        }
        let folded = raw.to_lowercase();
        Some(Self { raw, folded })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

/// Which subset of the catalogue a listing covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuestionFilter {
    #[default]
    All,
    Search(SearchTerm),
    Category(CategoryId),
}

impl QuestionFilter {
    /// Pick the mode from optional inputs. A non-empty search term wins over a category.
    #[must_use]
    pub fn from_parts(category: Option<CategoryId>, search: Option<&str>) -> Self {
        match (search.and_then(SearchTerm::new), category) {
            (Some(term), _) => Self::Search(term),
            (None, Some(id)) => Self::Category(id),
            (None, None) => Self::All,
        }
    }

    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Search(term) => term.matches(question.question()),
            Self::Category(id) => question.category() == *id,
        }
    }

    #[must_use]
    pub fn current_category(&self) -> Option<CategoryId> {
        match self {
            Self::Category(id) => Some(*id),
            Self::All | Self::Search(_) => None,
        }
    }

    #[must_use]
    pub fn is_paginated(&self) -> bool {
        !matches!(self, Self::Search(_))
    }
}

/// A listing request after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListRequest {
    pub filter: QuestionFilter,
    pub page: Page,
}

impl ListRequest {
    #[must_use]
    pub fn new(filter: QuestionFilter, page: Page) -> Self {
        Self { filter, page }
    }
}

/// One page (or, for search, the full match list) plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<CategoryId>,
}

/// Apply `request` to `questions`, which must be ordered by id ascending.
///
/// The input may already be narrowed by the store; the predicate is applied
/// again so results do not depend on how much the store filtered.
///
/// # Errors
///
/// Returns `ListError::NotFound` when a paginated mode yields an empty window.
pub fn list_questions(
    questions: &[Question],
    request: &ListRequest,
) -> Result<QuestionListing, ListError> {
    debug_assert!(
        questions.windows(2).all(|w| w[0].id() < w[1].id()),
        "questions must be strictly ordered by id"
    );

    let matching: Vec<&Question> = questions
        .iter()
        .filter(|q| request.filter.matches(q))
        .collect();
    let total_questions = matching.len();

    let visible: &[&Question] = if request.filter.is_paginated() {
        let window = paginate(&matching, request.page, QUESTIONS_PER_PAGE);
        if window.is_empty() {
            return Err(ListError::NotFound);
        }
        window
    } else {
        &matching
    };

    Ok(QuestionListing {
        questions: visible.iter().map(|q| (*q).clone()).collect(),
        total_questions,
        current_category: request.filter.current_category(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;

    fn question(id: u64, text: &str, category: u64) -> Question {
        Question::from_persisted(
            QuestionId::new(id),
            text.to_owned(),
            "answer".to_owned(),
            1,
            CategoryId::new(category),
        )
        .unwrap()
    }

    fn catalogue(n: u64) -> Vec<Question> {
        (1..=n)
            .map(|id| question(id, &format!("Question {id}"), 1 + id % 3))
            .collect()
    }

    fn ids(listing: &QuestionListing) -> Vec<u64> {
        listing.questions.iter().map(|q| q.id().value()).collect()
    }

    #[test]
    fn unfiltered_listing_pages_by_ten() {
        let all = catalogue(19);
        let first = list_questions(&all, &ListRequest::default()).unwrap();
        assert_eq!(ids(&first), (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_questions, 19);
        assert_eq!(first.current_category, None);

        let second = list_questions(
            &all,
            &ListRequest::new(QuestionFilter::All, Page::new(2).unwrap()),
        )
        .unwrap();
        assert_eq!(second.questions.len(), 9);
        assert_eq!(second.total_questions, 19);
    }

    #[test]
    fn page_past_end_is_not_found() {
        let all = catalogue(19);
        let err = list_questions(
            &all,
            &ListRequest::new(QuestionFilter::All, Page::new(3).unwrap()),
        )
        .unwrap_err();
        assert_eq!(err, ListError::NotFound);
    }

    #[test]
    fn empty_catalogue_is_not_found() {
        assert_eq!(
            list_questions(&[], &ListRequest::default()).unwrap_err(),
            ListError::NotFound
        );
    }

    #[test]
    fn category_total_is_independent_of_page() {
        let all: Vec<Question> = (1..=25).map(|id| question(id, "q", 4)).collect();
        let filter = QuestionFilter::Category(CategoryId::new(4));

        let p1 = list_questions(&all, &ListRequest::new(filter.clone(), Page::FIRST)).unwrap();
        let p3 = list_questions(&all, &ListRequest::new(filter, Page::new(3).unwrap())).unwrap();

        assert_eq!(p1.total_questions, 25);
        assert_eq!(p3.total_questions, 25);
        assert_eq!(ids(&p3), (21..=25).collect::<Vec<_>>());
        assert_eq!(p3.current_category, Some(CategoryId::new(4)));
    }

    #[test]
    fn unknown_category_is_not_found() {
        let all = catalogue(12);
        let err = list_questions(
            &all,
            &ListRequest::new(QuestionFilter::Category(CategoryId::new(1000)), Page::FIRST),
        )
        .unwrap_err();
        assert_eq!(err, ListError::NotFound);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let all = vec![
            question(13, "What is the largest lake in Africa?", 3),
            question(15, "The Taj Mahal is located in which Indian city?", 3),
        ];
        let filter = QuestionFilter::from_parts(None, Some("mahal"));
        let listing = list_questions(&all, &ListRequest::new(filter, Page::FIRST)).unwrap();
        assert_eq!(ids(&listing), vec![15]);
        assert_eq!(listing.total_questions, 1);
    }

    #[test]
    fn search_without_matches_is_empty_success() {
        let all = catalogue(5);
        let filter = QuestionFilter::from_parts(None, Some("aaaaa"));
        let listing = list_questions(&all, &ListRequest::new(filter, Page::FIRST)).unwrap();
        assert!(listing.questions.is_empty());
        assert_eq!(listing.total_questions, 0);
    }

    #[test]
    fn search_ignores_pagination() {
        let all = catalogue(30);
        let filter = QuestionFilter::from_parts(None, Some("QUESTION"));
        let listing =
            list_questions(&all, &ListRequest::new(filter, Page::new(7).unwrap())).unwrap();
        assert_eq!(listing.questions.len(), 30);
        assert_eq!(listing.total_questions, 30);
    }

    #[test]
    fn empty_search_term_means_no_search() {
        assert_eq!(QuestionFilter::from_parts(None, Some("")), QuestionFilter::All);
        assert_eq!(
            QuestionFilter::from_parts(Some(CategoryId::new(2)), Some("")),
            QuestionFilter::Category(CategoryId::new(2))
        );
        assert!(matches!(
            QuestionFilter::from_parts(Some(CategoryId::new(2)), Some("x")),
            QuestionFilter::Search(_)
        ));
    }

    #[test]
    fn listing_is_idempotent() {
        let all = catalogue(23);
        let request = ListRequest::new(QuestionFilter::All, Page::new(2).unwrap());
        assert_eq!(
            list_questions(&all, &request).unwrap(),
            list_questions(&all, &request).unwrap()
        );
    }
}
