//! Review-level error types.

use store::{Condition, OrderBy, StoreError};
use thiserror::Error;

/// Errors produced by the review usecase.
///
/// Every variant wraps the storage failure that caused it together with
/// the operation's inputs.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Storage refused to create the question.
    #[error("can't create question (user {user_id}, group {group_id}): {source}")]
    Create {
        user_id: u64,
        group_id: u64,
        #[source]
        source: StoreError,
    },

    /// Storage refused the content update.
    #[error("can't correct question {id}: {source}")]
    Correct {
        id: u64,
        #[source]
        source: StoreError,
    },

    /// Storage refused the delete.
    #[error("can't delete questions by conditions {conditions:?}: {source}")]
    Delete {
        conditions: Vec<Condition>,
        #[source]
        source: StoreError,
    },

    /// Storage failed to list questions.
    #[error(
        "can't find questions by conditions {conditions:?}, order {order:?}, \
         limit {limit}, offset {offset}: {source}"
    )]
    Find {
        conditions: Vec<Condition>,
        order: Vec<OrderBy>,
        limit: usize,
        offset: usize,
        #[source]
        source: StoreError,
    },
}

impl ReviewError {
    /// The underlying storage error.
    pub fn store_error(&self) -> &StoreError {
        match self {
            Self::Create { source, .. }
            | Self::Correct { source, .. }
            | Self::Delete { source, .. }
            | Self::Find { source, .. } => source,
        }
    }
}
