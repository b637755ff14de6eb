//! `PgQuestionStore` — the Postgres implementation of `QuestionStore`.

use async_trait::async_trait;
use tracing::debug;

use store::query::fetch_limit;
use store::{Condition, Field, OrderBy, Page, Question, QuestionStore, StoreError};

use crate::repository::questions as question_repo;
use crate::{DbError, DbPool};

/// Question store backed by the `questions` table.
///
/// Each operation is a single SQL statement, so row-level atomicity comes
/// from Postgres itself.
#[derive(Debug, Clone)]
pub struct PgQuestionStore {
    pool: DbPool,
}

impl PgQuestionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn create(&self, question: Question) -> Result<Question, StoreError> {
        let row = question_repo::insert_question(&self.pool, &question).await?;
        debug!(id = row.id, "question row inserted");
        Ok(Question::try_from(row)?)
    }

    async fn update(&self, question: &Question, fields: &[Field]) -> Result<Question, StoreError> {
        let values = question.values(fields);
        let row = question_repo::update_question_fields(&self.pool, question.id, &values)
            .await
            .map_err(|err| match err {
                DbError::NotFound => StoreError::NotFound { id: question.id },
                other => other.into(),
            })?;
        Ok(Question::try_from(row)?)
    }

    async fn delete(&self, conditions: &[Condition]) -> Result<u64, StoreError> {
        Ok(question_repo::delete_questions(&self.pool, conditions).await?)
    }

    async fn find(
        &self,
        conditions: &[Condition],
        order: &[OrderBy],
        limit: usize,
        offset: usize,
    ) -> Result<Page, StoreError> {
        let rows =
            question_repo::find_questions(&self.pool, conditions, order, fetch_limit(limit), offset)
                .await?;

        let questions = rows
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::from_overfetch(questions, limit))
    }
}
