//! Quiz turns: serve one unseen question at a time.
//!
//! Each turn is a pure function of the catalogue snapshot, the requested
//! category and the ids the caller has already been served.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::QuizError;
use crate::model::{Category, CategoryId, Question, QuestionId};

/// Category scope of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Category(CategoryId),
}

impl CategoryFilter {
    /// Raw category id that stands for "all categories".
    pub const ALL_SENTINEL: u64 = 0;

    #[must_use]
    pub fn from_raw(id: u64) -> Self {
        if id == Self::ALL_SENTINEL {
            Self::All
        } else {
            Self::Category(CategoryId::new(id))
        }
    }

    #[must_use]
    pub fn includes(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => question.category() == *id,
        }
    }
}

/// One quiz request: scope plus the ids already served in this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTurn {
    category: CategoryFilter,
    previous_ids: BTreeSet<QuestionId>,
}

impl QuizTurn {
    /// Duplicate ids in `previous` collapse.
    pub fn new(category: CategoryFilter, previous: impl IntoIterator<Item = QuestionId>) -> Self {
        Self {
            category,
            previous_ids: previous.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    #[must_use]
    pub fn previous_ids(&self) -> &BTreeSet<QuestionId> {
        &self.previous_ids
    }
}

/// Candidate ids minus previously served ids.
#[must_use]
pub fn unseen_ids(
    candidates: &BTreeSet<QuestionId>,
    previous: &BTreeSet<QuestionId>,
) -> BTreeSet<QuestionId> {
    candidates.difference(previous).copied().collect()
}

/// Pick the next question for `turn`, uniformly among unseen candidates.
///
/// `Ok(None)` means the pool is exhausted.
///
/// # Errors
///
/// Returns `QuizError::InvalidCategory` when the turn names a category that is
/// not in `categories`.
pub fn next_question<R: Rng + ?Sized>(
    questions: &[Question],
    categories: &[Category],
    turn: &QuizTurn,
    rng: &mut R,
) -> Result<Option<Question>, QuizError> {
    if let CategoryFilter::Category(id) = turn.category() {
        if !categories.iter().any(|c| c.id() == id) {
            return Err(QuizError::InvalidCategory(id));
        }
    }

    let candidates: BTreeMap<QuestionId, &Question> = questions
        .iter()
        .filter(|q| turn.category().includes(q))
        .map(|q| (q.id(), q))
        .collect();
    let candidate_ids: BTreeSet<QuestionId> = candidates.keys().copied().collect();

    let unseen: Vec<QuestionId> = unseen_ids(&candidate_ids, turn.previous_ids())
        .into_iter()
        .collect();

    Ok(unseen
        .choose(rng)
        .and_then(|id| candidates.get(id))
        .map(|q| (*q).clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryName;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn question(id: u64, category: u64) -> Question {
        Question::from_persisted(
            QuestionId::new(id),
            format!("Question {id}"),
            format!("Answer {id}"),
            2,
            CategoryId::new(category),
        )
        .unwrap()
    }

    fn categories() -> Vec<Category> {
        (1..=6)
            .map(|id| Category::new(CategoryId::new(id), CategoryName::new(format!("C{id}")).unwrap()))
            .collect()
    }

    fn geography() -> Vec<Question> {
        vec![question(13, 3), question(14, 3), question(15, 3)]
    }

    fn ids(raw: &[u64]) -> Vec<QuestionId> {
        raw.iter().copied().map(QuestionId::new).collect()
    }

    #[test]
    fn returns_the_only_unseen_question() {
        let mut rng = StdRng::seed_from_u64(1);
        let turn = QuizTurn::new(CategoryFilter::from_raw(3), ids(&[13, 14]));
        let next = next_question(&geography(), &categories(), &turn, &mut rng).unwrap();
        assert_eq!(next.map(|q| q.id()), Some(QuestionId::new(15)));
    }

    #[test]
    fn exhausted_pool_returns_none() {
        let mut rng = StdRng::seed_from_u64(2);
        let turn = QuizTurn::new(CategoryFilter::from_raw(3), ids(&[13, 14, 15]));
        let next = next_question(&geography(), &categories(), &turn, &mut rng).unwrap();
        assert!(next.is_none());
    }

    #[test]
    fn empty_category_is_exhausted_not_invalid() {
        let mut rng = StdRng::seed_from_u64(3);
        let turn = QuizTurn::new(CategoryFilter::from_raw(6), Vec::new());
        let next = next_question(&geography(), &categories(), &turn, &mut rng).unwrap();
        assert!(next.is_none());
    }

    #[test]
    fn unknown_category_is_invalid() {
        let mut rng = StdRng::seed_from_u64(4);
        let turn = QuizTurn::new(CategoryFilter::from_raw(1000), Vec::new());
        let err = next_question(&geography(), &categories(), &turn, &mut rng).unwrap_err();
        assert_eq!(err, QuizError::InvalidCategory(CategoryId::new(1000)));
    }

    #[test]
    fn all_sentinel_spans_every_category() {
        let pool = vec![question(1, 1), question(2, 2), question(3, 5)];
        let mut rng = StdRng::seed_from_u64(5);
        let turn = QuizTurn::new(CategoryFilter::from_raw(0), ids(&[1, 3]));
        let next = next_question(&pool, &[], &turn, &mut rng).unwrap();
        assert_eq!(next.map(|q| q.id()), Some(QuestionId::new(2)));
    }

    #[test]
    fn never_repeats_previous_ids() {
        let pool: Vec<Question> = (1..=12).map(|id| question(id, 1 + id % 2)).collect();
        let mut rng = StdRng::seed_from_u64(6);
        let mut served = Vec::new();
        loop {
            let turn = QuizTurn::new(CategoryFilter::All, served.clone());
            match next_question(&pool, &categories(), &turn, &mut rng).unwrap() {
                Some(q) => {
                    assert!(!served.contains(&q.id()));
                    served.push(q.id());
                }
                None => break,
            }
        }
        served.sort();
        assert_eq!(served, (1..=12).map(QuestionId::new).collect::<Vec<_>>());
    }

    #[test]
    fn duplicate_and_foreign_previous_ids_are_inert() {
        let pool = geography();
        let noisy = QuizTurn::new(CategoryFilter::from_raw(3), ids(&[14, 999, 13, 14, 1, 13]));
        let clean = QuizTurn::new(CategoryFilter::from_raw(3), ids(&[13, 14]));

        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(
            next_question(&pool, &categories(), &noisy, &mut a).unwrap(),
            next_question(&pool, &categories(), &clean, &mut b).unwrap()
        );
    }

    #[test]
    fn choice_is_roughly_uniform() {
        let pool = geography();
        let turn = QuizTurn::new(CategoryFilter::from_raw(3), Vec::new());
        let mut rng = StdRng::seed_from_u64(8);
        let mut counts: HashMap<QuestionId, u32> = HashMap::new();
        for _ in 0..3000 {
            let q = next_question(&pool, &categories(), &turn, &mut rng)
                .unwrap()
                .unwrap();
            *counts.entry(q.id()).or_default() += 1;
        }
        assert_eq!(counts.len(), 3);
        for (id, count) in counts {
            assert!((850..=1150).contains(&count), "{id:?} drawn {count} times");
        }
    }

    #[test]
    fn unseen_ids_is_a_set_difference() {
        let candidates: BTreeSet<_> = ids(&[1, 2, 3, 4]).into_iter().collect();
        let previous: BTreeSet<_> = ids(&[4, 2, 9]).into_iter().collect();
        assert_eq!(
            unseen_ids(&candidates, &previous),
            ids(&[1, 3]).into_iter().collect()
        );
    }
}
