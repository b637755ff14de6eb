//! Question CRUD operations.
//!
//! Filtered statements are assembled with `QueryBuilder`; every value is a
//! bind parameter, only column names and sort keywords are spliced into the
//! SQL text (and those come from closed enums).

use sqlx::{PgPool, Postgres, QueryBuilder};
use store::{Condition, Field, OrderBy, Question, Value};

use crate::models::{to_db_int, QuestionRow, QUESTION_COLUMNS};
use crate::DbError;

/// Insert a new question. `id` is assigned by the `BIGSERIAL` column.
pub async fn insert_question(pool: &PgPool, question: &Question) -> Result<QuestionRow, DbError> {
    let sql = format!(
        r#"
        INSERT INTO questions (user_id, group_id, title, body, step, repeat_time, is_failed)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {QUESTION_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, QuestionRow>(&sql)
        .bind(to_db_int("user_id", question.user_id)?)
        .bind(to_db_int("group_id", question.group_id)?)
        .bind(&question.title)
        .bind(&question.body)
        .bind(i16::from(question.step))
        .bind(question.repeat_time)
        .bind(question.is_failed)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

/// Fetch a single question by its primary key.
pub async fn get_question(pool: &PgPool, id: u64) -> Result<QuestionRow, DbError> {
    let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");

    sqlx::query_as::<_, QuestionRow>(&sql)
        .bind(to_db_int("id", id)?)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Write `values` into the row identified by `id` in one statement.
///
/// Returns `DbError::NotFound` if no row has that id.
pub async fn update_question_fields(
    pool: &PgPool,
    id: u64,
    values: &[(Field, Value)],
) -> Result<QuestionRow, DbError> {
    if values.is_empty() {
        return get_question(pool, id).await;
    }

    let mut qb = build_update_query(id, values)?;
    qb.build_query_as::<QuestionRow>()
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Delete every question matching `conditions` and return the row count.
///
/// An empty condition list is refused rather than wiping the table.
pub async fn delete_questions(pool: &PgPool, conditions: &[Condition]) -> Result<u64, DbError> {
    let mut qb = build_delete_query(conditions)?;
    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Return rows matching `conditions`, sorted by `order`.
///
/// `row_limit` is the number of rows to fetch (`None` = all); callers
/// computing a page pass `store::query::fetch_limit(limit)`.
pub async fn find_questions(
    pool: &PgPool,
    conditions: &[Condition],
    order: &[OrderBy],
    row_limit: Option<usize>,
    offset: usize,
) -> Result<Vec<QuestionRow>, DbError> {
    let mut qb = build_find_query(conditions, order, row_limit, offset)?;
    let rows = qb.build_query_as::<QuestionRow>().fetch_all(pool).await?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Statement builders
// ---------------------------------------------------------------------------

pub(crate) fn build_update_query(
    id: u64,
    values: &[(Field, Value)],
) -> Result<QueryBuilder<'static, Postgres>, DbError> {
    let mut qb = QueryBuilder::new("UPDATE questions SET ");
    for (i, (field, value)) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(field.column()).push(" = ");
        push_value(&mut qb, *field, value)?;
    }
    qb.push(" WHERE id = ").push_bind(to_db_int("id", id)?);
    qb.push(format!(" RETURNING {QUESTION_COLUMNS}"));
    Ok(qb)
}

pub(crate) fn build_delete_query(
    conditions: &[Condition],
) -> Result<QueryBuilder<'static, Postgres>, DbError> {
    if conditions.is_empty() {
        return Err(DbError::MissingConditions);
    }
    let mut qb = QueryBuilder::new("DELETE FROM questions");
    push_conditions(&mut qb, conditions)?;
    Ok(qb)
}

pub(crate) fn build_find_query(
    conditions: &[Condition],
    order: &[OrderBy],
    row_limit: Option<usize>,
    offset: usize,
) -> Result<QueryBuilder<'static, Postgres>, DbError> {
    let mut qb = QueryBuilder::new(format!("SELECT {QUESTION_COLUMNS} FROM questions"));
    push_conditions(&mut qb, conditions)?;

    for (i, clause) in order.iter().enumerate() {
        qb.push(if i == 0 { " ORDER BY " } else { ", " });
        qb.push(clause.field.column())
            .push(" ")
            .push(clause.direction.as_sql());
    }

    // A row limit beyond BIGINT cannot cut anything off.
    if let Some(limit) = row_limit.and_then(|l| i64::try_from(l).ok()) {
        qb.push(" LIMIT ").push_bind(limit);
    }
    if offset > 0 {
        qb.push(" OFFSET ").push_bind(to_db_int("offset", offset as u64)?);
    }

    Ok(qb)
}

fn push_conditions(
    qb: &mut QueryBuilder<'static, Postgres>,
    conditions: &[Condition],
) -> Result<(), DbError> {
    for (i, condition) in conditions.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match condition {
            Condition::Eq(field, value) => {
                qb.push(field.column()).push(" = ");
                push_value(qb, *field, value)?;
            }
            Condition::In(_, values) if values.is_empty() => {
                qb.push("FALSE");
            }
            Condition::In(field, values) => {
                qb.push(field.column()).push(" IN (");
                for (j, value) in values.iter().enumerate() {
                    if j > 0 {
                        qb.push(", ");
                    }
                    push_value(qb, *field, value)?;
                }
                qb.push(")");
            }
        }
    }
    Ok(())
}

fn push_value(
    qb: &mut QueryBuilder<'static, Postgres>,
    field: Field,
    value: &Value,
) -> Result<(), DbError> {
    match value {
        Value::U64(v) => {
            qb.push_bind(to_db_int(field.column(), *v)?);
        }
        Value::Text(v) => {
            qb.push_bind(v.clone());
        }
        Value::Step(v) => {
            qb.push_bind(i16::from(*v));
        }
        Value::Time(v) => {
            qb.push_bind(*v);
        }
        Value::Bool(v) => {
            qb.push_bind(*v);
        }
    }
    Ok(())
}
