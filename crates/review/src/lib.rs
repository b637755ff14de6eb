//! `review` crate — the repetition scheduler and the review usecase.

pub mod error;
pub mod scheduler;
pub mod usecase;

pub use error::ReviewError;
pub use scheduler::next_repeat_time;
pub use usecase::{ReviewConfig, ReviewUsecase, CORRECTABLE_FIELDS};
