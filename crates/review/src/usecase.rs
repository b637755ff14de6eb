//! Review usecase.
//!
//! `ReviewUsecase` is the only component that touches scheduling fields:
//! 1. `add` discards caller-supplied `step`, `repeat_time` and `is_failed`,
//!    schedules the question at step 1 and persists it.
//! 2. `correct` writes content fields only (`group_id`, `title`, `body`).
//! 3. `delete` and `find` pass their query through to storage untouched.
//!
//! Storage errors are wrapped with the operation's inputs and returned;
//! nothing is retried here.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use store::{Condition, Field, OrderBy, Page, Question, QuestionStore};

use crate::scheduler::{next_repeat_time, FIRST_STEP};
use crate::ReviewError;

/// Fields a correction is allowed to write.
pub const CORRECTABLE_FIELDS: [Field; 3] = [Field::GroupId, Field::Title, Field::Body];

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the usecase.
#[derive(Debug, Clone, Default)]
pub struct ReviewConfig {
    /// Reference instant used instead of the wall clock. `None` or the Unix
    /// epoch means "use the real current time".
    pub fixed_now: Option<DateTime<Utc>>,
}

impl ReviewConfig {
    pub fn with_fixed_now(now: DateTime<Utc>) -> Self {
        Self { fixed_now: Some(now) }
    }

    /// Instant to schedule from.
    pub fn now(&self) -> DateTime<Utc> {
        match self.fixed_now {
            Some(now) if now != DateTime::<Utc>::UNIX_EPOCH => now,
            _ => Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// ReviewUsecase
// ---------------------------------------------------------------------------

/// Orchestrates the scheduler and the question store.
///
/// Holds no mutable state; share one instance behind an `Arc`.
pub struct ReviewUsecase {
    store: Arc<dyn QuestionStore>,
    config: ReviewConfig,
}

impl ReviewUsecase {
    pub fn new(store: Arc<dyn QuestionStore>, config: ReviewConfig) -> Self {
        Self { store, config }
    }

    /// Schedule and persist a new question.
    ///
    /// The caller's `question` is never modified: on failure it still holds
    /// its original scheduling fields, on success the returned value carries
    /// the storage-assigned id and the step-1 schedule.
    ///
    /// # Errors
    /// [`ReviewError::Create`] wrapping the storage failure.
    #[instrument(skip(self, question), fields(user_id = question.user_id, group_id = question.group_id))]
    pub async fn add(&self, question: &Question) -> Result<Question, ReviewError> {
        let mut scheduled = question.clone();
        scheduled.step = FIRST_STEP;
        scheduled.repeat_time = next_repeat_time(FIRST_STEP, self.config.now());
        scheduled.is_failed = false;

        match self.store.create(scheduled).await {
            Ok(created) => {
                info!(id = created.id, repeat_time = %created.repeat_time, "question added");
                Ok(created)
            }
            Err(source) => {
                warn!("question create failed, scheduling fields discarded: {source}");
                Err(ReviewError::Create {
                    user_id: question.user_id,
                    group_id: question.group_id,
                    source,
                })
            }
        }
    }

    /// Persist the content fields of an existing question.
    ///
    /// `step`, `repeat_time` and `is_failed` on `question` are ignored.
    ///
    /// # Errors
    /// [`ReviewError::Correct`] wrapping the storage failure.
    #[instrument(skip(self, question), fields(id = question.id))]
    pub async fn correct(&self, question: &Question) -> Result<Question, ReviewError> {
        let stored = self
            .store
            .update(question, &CORRECTABLE_FIELDS)
            .await
            .map_err(|source| ReviewError::Correct { id: question.id, source })?;

        info!("question corrected");
        Ok(stored)
    }

    /// Delete every question matching `conditions`.
    ///
    /// # Errors
    /// [`ReviewError::Delete`] wrapping the storage failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, conditions: &[Condition]) -> Result<u64, ReviewError> {
        let removed = self
            .store
            .delete(conditions)
            .await
            .map_err(|source| ReviewError::Delete {
                conditions: conditions.to_vec(),
                source,
            })?;

        info!(removed, "questions deleted");
        Ok(removed)
    }

    /// List questions page by page.
    ///
    /// The page and its `more` flag are returned exactly as storage reports them.
    ///
    /// # Errors
    /// [`ReviewError::Find`] wrapping the storage failure.
    #[instrument(skip(self))]
    pub async fn find(
        &self,
        conditions: &[Condition],
        order: &[OrderBy],
        limit: usize,
        offset: usize,
    ) -> Result<Page, ReviewError> {
        self.store
            .find(conditions, order, limit, offset)
            .await
            .map_err(|source| ReviewError::Find {
                conditions: conditions.to_vec(),
                order: order.to_vec(),
                limit,
                offset,
                source,
            })
    }

    /// Look up a single question by id. `Ok(None)` is the not-found case.
    pub async fn get(&self, id: u64) -> Result<Option<Question>, ReviewError> {
        let page = self.find(&[Condition::id(id)], &[], 1, 0).await?;
        Ok(page.items.into_iter().next())
    }
}
