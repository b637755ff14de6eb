//! Storage-level error type.

use thiserror::Error;

/// Errors returned by a [`QuestionStore`](crate::QuestionStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id exists.
    #[error("question {id} not found")]
    NotFound { id: u64 },

    /// A delete was requested without any condition.
    #[error("refusing to delete questions without conditions")]
    MissingConditions,

    /// Plain failure message, mostly produced by in-process adapters.
    #[error("{0}")]
    Message(String),

    /// Failure bubbled up from a concrete backend driver.
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}
