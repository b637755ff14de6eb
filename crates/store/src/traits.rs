//! The `QuestionStore` trait — the contract every persistence backend must fulfil.

use async_trait::async_trait;

use crate::{Condition, Field, OrderBy, Page, Question, StoreError};

/// Abstract persistence for questions.
///
/// Implementations own row-level atomicity: every method must map onto a
/// single statement (or equivalent) scoped by its conditions.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Persist a new question and return it with every storage-assigned
    /// field (notably `id`) populated.
    async fn create(&self, question: Question) -> Result<Question, StoreError>;

    /// Persist only `fields` of `question`, identified by `question.id`,
    /// and return the stored record.
    ///
    /// An empty `fields` slice writes every field except the id.
    async fn update(&self, question: &Question, fields: &[Field]) -> Result<Question, StoreError>;

    /// Remove every record matching `conditions` and return how many were removed.
    async fn delete(&self, conditions: &[Condition]) -> Result<u64, StoreError>;

    /// Return up to `limit` records (`0` = unlimited) matching `conditions`,
    /// sorted by `order`, skipping `offset` records.
    ///
    /// `Page::more` follows the over-fetch protocol in [`crate::query`].
    async fn find(
        &self,
        conditions: &[Condition],
        order: &[OrderBy],
        limit: usize,
        offset: usize,
    ) -> Result<Page, StoreError>;
}
