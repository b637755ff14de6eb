//! `MemoryStore` — an in-process `QuestionStore`.
//!
//! Backs the unit tests of every crate in the workspace and serves as the
//! reference implementation of the pagination protocol. Every call is
//! recorded so tests can assert exactly what reached storage.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::query::{compare, fetch_limit, matches_all};
use crate::{Condition, Field, OrderBy, Page, Question, QuestionStore, StoreError};

/// Behaviour injected into `MemoryStore` at construction time.
#[derive(Debug, Clone)]
pub enum MemoryBehaviour {
    /// Operate on the in-memory table.
    Normal,
    /// Record the call, then fail with `StoreError::Message`.
    Fail(String),
}

/// A call received by the store, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create(Question),
    Update {
        question: Question,
        fields: Vec<Field>,
    },
    Delete(Vec<Condition>),
    Find {
        conditions: Vec<Condition>,
        order: Vec<OrderBy>,
        limit: usize,
        offset: usize,
    },
}

#[derive(Debug)]
struct Table {
    rows: BTreeMap<u64, Question>,
    next_id: u64,
}

/// In-memory question table keyed by id.
#[derive(Debug)]
pub struct MemoryStore {
    table: Mutex<Table>,
    behaviour: MemoryBehaviour,
    calls: Mutex<Vec<StoreCall>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store that always succeeds.
    pub fn new() -> Self {
        Self::with_behaviour(MemoryBehaviour::Normal)
    }

    /// Store whose every operation fails with `msg`.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self::with_behaviour(MemoryBehaviour::Fail(msg.into()))
    }

    pub fn with_behaviour(behaviour: MemoryBehaviour) -> Self {
        Self {
            table: Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
            behaviour,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Store pre-seeded with `questions`. Questions with `id == 0` get the
    /// next free id; explicit ids are kept.
    pub fn with_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let store = Self::new();
        {
            let mut table = lock(&store.table);
            for mut q in questions {
                if q.id == 0 {
                    q.id = table.next_id;
                }
                table.next_id = table.next_id.max(q.id + 1);
                table.rows.insert(q.id, q);
            }
        }
        store
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Snapshot of the stored rows in id order.
    pub fn rows(&self) -> Vec<Question> {
        lock(&self.table).rows.values().cloned().collect()
    }

    fn record(&self, call: StoreCall) -> Result<(), StoreError> {
        lock(&self.calls).push(call);
        match &self.behaviour {
            MemoryBehaviour::Normal => Ok(()),
            MemoryBehaviour::Fail(msg) => Err(StoreError::Message(msg.clone())),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn create(&self, question: Question) -> Result<Question, StoreError> {
        self.record(StoreCall::Create(question.clone()))?;

        let mut table = lock(&self.table);
        let mut stored = question;
        stored.id = table.next_id;
        table.next_id += 1;
        table.rows.insert(stored.id, stored.clone());

        debug!(id = stored.id, "memory store: question created");
        Ok(stored)
    }

    async fn update(&self, question: &Question, fields: &[Field]) -> Result<Question, StoreError> {
        self.record(StoreCall::Update {
            question: question.clone(),
            fields: fields.to_vec(),
        })?;

        let mut table = lock(&self.table);
        let stored = table
            .rows
            .get_mut(&question.id)
            .ok_or(StoreError::NotFound { id: question.id })?;
        stored.assign_from(question, fields);

        Ok(stored.clone())
    }

    async fn delete(&self, conditions: &[Condition]) -> Result<u64, StoreError> {
        self.record(StoreCall::Delete(conditions.to_vec()))?;

        if conditions.is_empty() {
            return Err(StoreError::MissingConditions);
        }

        let mut table = lock(&self.table);
        let before = table.rows.len();
        table.rows.retain(|_, q| !matches_all(conditions, q));
        let removed = (before - table.rows.len()) as u64;

        debug!(removed, "memory store: questions deleted");
        Ok(removed)
    }

    async fn find(
        &self,
        conditions: &[Condition],
        order: &[OrderBy],
        limit: usize,
        offset: usize,
    ) -> Result<Page, StoreError> {
        self.record(StoreCall::Find {
            conditions: conditions.to_vec(),
            order: order.to_vec(),
            limit,
            offset,
        })?;

        let table = lock(&self.table);
        let mut matched: Vec<Question> = table
            .rows
            .values()
            .filter(|q| matches_all(conditions, q))
            .cloned()
            .collect();
        drop(table);

        matched.sort_by(|a, b| compare(order, a, b));

        let rows: Vec<Question> = matched
            .into_iter()
            .skip(offset)
            .take(fetch_limit(limit).unwrap_or(usize::MAX))
            .collect();

        Ok(Page::from_overfetch(rows, limit))
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(n: u64, group_id: u64) -> MemoryStore {
        MemoryStore::with_questions(
            (1..=n).map(|i| Question::new(1, group_id, format!("t{i}"), format!("b{i}"))),
        )
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MemoryStore::new();

        let a = store.create(Question::new(1, 1, "a", "a")).await.unwrap();
        let b = store.create(Question::new(1, 1, "b", "b")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.rows().len(), 2);
    }

    #[tokio::test]
    async fn limit_below_match_count_reports_more() {
        let store = seeded(3, 1);
        let page = store.find(&[], &[], 2, 0).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(page.more);
    }

    #[tokio::test]
    async fn limit_equal_to_match_count_reports_no_more() {
        let store = seeded(2, 1);
        let page = store.find(&[], &[], 2, 0).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(!page.more);
    }

    #[tokio::test]
    async fn zero_limit_returns_everything_after_offset() {
        let store = seeded(5, 1);
        let page = store.find(&[], &[], 0, 2).await.unwrap();

        assert_eq!(page.items.iter().map(|q| q.id).collect::<Vec<_>>(), vec![3, 4, 5]);
        assert!(!page.more);
    }

    #[tokio::test]
    async fn maximal_limit_returns_everything_without_more() {
        let store = seeded(3, 1);
        let page = store.find(&[], &[], usize::MAX, 0).await.unwrap();

        assert_eq!(page.items.len(), 3);
        assert!(!page.more);
    }

    #[tokio::test]
    async fn find_filters_then_orders_then_pages() {
        let store = MemoryStore::with_questions([
            Question::new(1, 1, "a", ""),
            Question::new(1, 2, "b", ""),
            Question::new(1, 3, "c", ""),
            Question::new(1, 2, "d", ""),
        ]);

        let page = store
            .find(
                &[Condition::any_of(Field::GroupId, [1u64, 2])],
                &[OrderBy::desc(Field::Id)],
                2,
                1,
            )
            .await
            .unwrap();

        assert_eq!(page.items.iter().map(|q| q.id).collect::<Vec<_>>(), vec![2, 1]);
        assert!(!page.more);
    }

    #[tokio::test]
    async fn update_writes_only_listed_fields() {
        let store = seeded(1, 1);
        let mut changed = store.rows()[0].clone();
        changed.title = "new".into();
        changed.step = 9;

        let stored = store.update(&changed, &[Field::Title]).await.unwrap();

        assert_eq!(stored.title, "new");
        assert_eq!(stored.step, 0);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let q = Question { id: 42, ..Question::default() };

        let err = store.update(&q, &[Field::Title]).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn delete_requires_conditions() {
        let store = seeded(2, 1);

        let err = store.delete(&[]).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingConditions));
        assert_eq!(store.rows().len(), 2);

        assert_eq!(store.delete(&[Condition::id(1)]).await.unwrap(), 1);
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn failing_store_records_the_call_and_errors() {
        let store = MemoryStore::failing("disk full");

        let err = store.find(&[], &[], 0, 0).await.unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(store.call_count(), 1);
    }
}
