use trivia_core::model::{CategoryId, Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{
    category_id_to_i64, category_key, conn, map_question_row, map_question_rows,
    question_id_from_i64, question_id_to_i64, question_key,
};
use crate::repository::{NewQuestionRecord, QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (question, answer, difficulty, category)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(record.question)
        .bind(record.answer)
        .bind(i64::from(record.difficulty))
        .bind(category_id_to_i64(record.category)?)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (id, question, answer, difficulty, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                difficulty = excluded.difficulty,
                category = excluded.category
            ",
        )
        .bind(question_id_to_i64(question.id())?)
        .bind(question.question().to_owned())
        .bind(question.answer().to_owned())
        .bind(i64::from(question.difficulty().value()))
        .bind(category_id_to_i64(question.category())?)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let Some(key) = question_key(id) else {
            return Ok(None);
        };
        let row = sqlx::query(
            r"
            SELECT id, question, answer, difficulty, category
            FROM questions WHERE id = ?1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn question_exists(&self, id: QuestionId) -> Result<bool, StorageError> {
        let Some(key) = question_key(id) else {
            return Ok(false);
        };
        let row = sqlx::query("SELECT 1 FROM questions WHERE id = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        Ok(row.is_some())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let key = question_key(id).ok_or(StorageError::NotFound)?;
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, difficulty, category
            FROM questions
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        map_question_rows(&rows)
    }

    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError> {
        let Some(key) = category_key(category) else {
            return Ok(Vec::new());
        };
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, difficulty, category
            FROM questions
            WHERE category = ?1
            ORDER BY id ASC
            ",
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        map_question_rows(&rows)
    }
}
