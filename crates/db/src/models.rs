//! Row struct that maps 1-to-1 onto the `questions` table.
//!
//! This is a *persistence* model. Postgres has no unsigned integers, so ids
//! are `BIGINT` and `step` is `SMALLINT`; conversion to the domain
//! [`Question`] is checked.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::Question;

use crate::DbError;

/// Column list in `QuestionRow` field order, for SELECT / RETURNING clauses.
pub const QUESTION_COLUMNS: &str =
    "id, user_id, group_id, title, body, step, repeat_time, is_failed";

/// A persisted question row.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub user_id: i64,
    pub group_id: i64,
    pub title: String,
    pub body: String,
    pub step: i16,
    pub repeat_time: DateTime<Utc>,
    pub is_failed: bool,
}

impl TryFrom<QuestionRow> for Question {
    type Error = DbError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        Ok(Question {
            id: from_db_int("id", row.id)?,
            user_id: from_db_int("user_id", row.user_id)?,
            group_id: from_db_int("group_id", row.group_id)?,
            title: row.title,
            body: row.body,
            step: u8::try_from(row.step).map_err(|_| DbError::OutOfRange {
                column: "step",
                value: row.step.to_string(),
            })?,
            repeat_time: row.repeat_time,
            is_failed: row.is_failed,
        })
    }
}

/// Checked `u64 -> BIGINT` conversion.
pub fn to_db_int(column: &'static str, value: u64) -> Result<i64, DbError> {
    i64::try_from(value).map_err(|_| DbError::OutOfRange {
        column,
        value: value.to_string(),
    })
}

fn from_db_int(column: &'static str, value: i64) -> Result<u64, DbError> {
    u64::try_from(value).map_err(|_| DbError::OutOfRange {
        column,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row() -> QuestionRow {
        QuestionRow {
            id: 1,
            user_id: 2,
            group_id: 3,
            title: "Title".into(),
            body: "Body".into(),
            step: 4,
            repeat_time: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            is_failed: true,
        }
    }

    #[test]
    fn row_converts_into_question() {
        let q = Question::try_from(row()).unwrap();
        assert_eq!((q.id, q.user_id, q.group_id, q.step), (1, 2, 3, 4));
        assert!(q.is_failed);
    }

    #[test]
    fn negative_id_is_rejected() {
        let err = Question::try_from(QuestionRow { id: -1, ..row() }).unwrap_err();
        assert!(matches!(err, DbError::OutOfRange { column: "id", .. }));
    }

    #[test]
    fn oversized_step_is_rejected() {
        let err = Question::try_from(QuestionRow { step: 300, ..row() }).unwrap_err();
        assert!(matches!(err, DbError::OutOfRange { column: "step", .. }));
    }

    #[test]
    fn huge_unsigned_id_does_not_fit_bigint() {
        assert!(to_db_int("id", u64::MAX).is_err());
        assert_eq!(to_db_int("id", 7).unwrap(), 7);
    }
}
