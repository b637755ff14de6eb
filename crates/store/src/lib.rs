//! `store` crate — the `Question` entity and the `QuestionStore` port.
//!
//! Every persistence backend must implement [`QuestionStore`]. The review
//! crate talks to storage only through this trait, so it lives here where
//! both the usecase and the adapters can import it without a cycle.

pub mod error;
pub mod memory;
pub mod query;
pub mod question;
pub mod traits;

pub use error::StoreError;
pub use query::{Condition, Direction, OrderBy, Page};
pub use question::{Field, Question, Value};
pub use traits::QuestionStore;
