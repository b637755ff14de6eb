//! Typed error type for the db crate.

use store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,

    #[error("refusing to run DELETE without a WHERE clause")]
    MissingConditions,

    /// A value does not fit the column type (Postgres has no unsigned integers).
    #[error("value {value} out of range for column {column}")]
    OutOfRange { column: &'static str, value: String },
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::MissingConditions => StoreError::MissingConditions,
            other => StoreError::backend(other),
        }
    }
}
