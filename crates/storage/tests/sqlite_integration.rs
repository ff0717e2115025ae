use storage::repository::{
    CategoryRepository, NewQuestionRecord, QuestionRepository, Storage, StorageError,
};
use storage::sqlite::SqliteRepository;
use trivia_core::model::{CategoryId, Question, QuestionId};

async fn seeded(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::open(&url).await.expect("open");
    for category in storage::fixtures::sample_categories() {
        repo.upsert_category(&category).await.unwrap();
    }
    for question in storage::fixtures::sample_questions() {
        repo.upsert_question(&question).await.unwrap();
    }
    repo
}

fn ids(questions: &[Question]) -> Vec<u64> {
    questions.iter().map(|q| q.id().value()).collect()
}

#[tokio::test]
async fn sqlite_lists_questions_and_categories_in_id_order() {
    let repo = seeded("memdb_listing").await;

    let categories = repo.list_categories().await.unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[2].name().as_str(), "Geography");

    let all = repo.list_questions().await.unwrap();
    assert_eq!(all.len(), 19);
    assert!(all.windows(2).all(|w| w[0].id() < w[1].id()));

    let science = repo.questions_in_category(CategoryId::new(1)).await.unwrap();
    assert_eq!(ids(&science), vec![20, 21, 22]);
}

#[tokio::test]
async fn sqlite_treats_out_of_range_ids_as_absent() {
    let repo = seeded("memdb_out_of_range").await;
    let huge_question = QuestionId::new(1 << 63);
    let huge_category = CategoryId::new(u64::MAX);

    assert!(repo.get_question(huge_question).await.unwrap().is_none());
    assert!(!repo.question_exists(huge_question).await.unwrap());
    assert!(matches!(
        repo.delete_question(huge_question).await.unwrap_err(),
        StorageError::NotFound
    ));
    assert!(repo.get_category(huge_category).await.unwrap().is_none());
    assert!(
        repo.questions_in_category(huge_category)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn sqlite_insert_and_delete_round_trip() {
    let repo = seeded("memdb_insert_delete").await;

    let id = repo
        .insert_new_question(NewQuestionRecord {
            question: "test question".into(),
            answer: "test answer".into(),
            difficulty: 2,
            category: CategoryId::new(1),
        })
        .await
        .unwrap();
    assert_eq!(id, QuestionId::new(24));
    assert!(repo.question_exists(id).await.unwrap());

    let fetched = repo.get_question(id).await.unwrap().expect("stored");
    assert_eq!(fetched.answer(), "test answer");

    repo.delete_question(id).await.unwrap();
    assert!(!repo.question_exists(id).await.unwrap());

    let err = repo.delete_question(id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_rejects_question_for_missing_category() {
    let repo = seeded("memdb_fk").await;

    let err = repo
        .insert_new_question(NewQuestionRecord {
            question: "orphan".into(),
            answer: "none".into(),
            difficulty: 1,
            category: CategoryId::new(1000),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Connection(_)));
}

#[tokio::test]
async fn storage_sqlite_seeds_idempotently() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage_seed?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.seed_sample_catalog().await.unwrap();
    storage.seed_sample_catalog().await.unwrap();

    assert_eq!(storage.questions.list_questions().await.unwrap().len(), 19);
    assert!(
        storage
            .categories
            .get_category(CategoryId::new(6))
            .await
            .unwrap()
            .is_some()
    );
}
