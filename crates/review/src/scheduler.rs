//! Repetition schedule — maps a step of the curriculum to the next review time.
//!
//! | step  | offset     |
//! |-------|------------|
//! | 1     | 30 minutes |
//! | 2     | 14 days    |
//! | 3     | 60 days    |
//! | other | 90 days    |

use chrono::{DateTime, Duration, Utc};

/// Step every new question starts at.
pub const FIRST_STEP: u8 = 1;

/// Delay between `now` and the next review for the given step.
pub fn offset(step: u8) -> Duration {
    match step {
        1 => Duration::minutes(30),
        2 => Duration::days(14),
        3 => Duration::days(60),
        _ => Duration::days(90),
    }
}

/// When a question at `step` is due again, counted from `now`.
pub fn next_repeat_time(step: u8, now: DateTime<Utc>) -> DateTime<Utc> {
    now + offset(step)
}
