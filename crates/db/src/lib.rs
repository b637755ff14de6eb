//! `db` crate — Postgres persistence for questions.
//!
//! Provides a connection pool, the row struct, repository functions and
//! [`PgQuestionStore`], the `QuestionStore` adapter the review usecase is
//! wired with in production.
//!
//! Expected table (schema management happens outside this crate):
//!
//! ```sql
//! CREATE TABLE questions (
//!     id          BIGSERIAL   PRIMARY KEY,
//!     user_id     BIGINT      NOT NULL,
//!     group_id    BIGINT      NOT NULL,
//!     title       TEXT        NOT NULL,
//!     body        TEXT        NOT NULL,
//!     step        SMALLINT    NOT NULL,
//!     repeat_time TIMESTAMPTZ NOT NULL,
//!     is_failed   BOOLEAN     NOT NULL
//! );
//! ```

pub mod error;
pub mod models;
pub mod pool;
pub mod repository;
pub mod pg_store;

pub use error::DbError;
pub use pool::{DbPool, PoolConfig};
pub use pg_store::PgQuestionStore;
