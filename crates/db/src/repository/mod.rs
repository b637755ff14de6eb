//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! No scheduling rules, no pagination bookkeeping — pure SQL.

pub mod questions;
