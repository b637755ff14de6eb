use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use store::{Condition, Field, OrderBy, Question, StoreError};
use tracing::error;

use super::AppState;

/// Page size used when a listing request does not set `limit`.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionDto {
    pub title: String,
    pub body: String,
    /// Accepted as a JSON number or a numeric string.
    #[serde(deserialize_with = "numeric_id")]
    pub group_id: u64,
    #[serde(default)]
    pub user_id: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectQuestionDto {
    pub title: Option<String>,
    pub body: Option<String>,
    pub group_id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsQuery {
    pub group_id: Option<u64>,
    pub user_id: Option<u64>,
    /// Comma-separated order clauses, e.g. `id desc,title`.
    pub order: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

fn numeric_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub async fn add_question(
    State(state): State<AppState>,
    Json(payload): Json<AddQuestionDto>,
) -> Result<Json<Value>, StatusCode> {
    if payload.group_id == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let question = Question::new(payload.user_id, payload.group_id, payload.title, payload.body);

    match state.usecase.add(&question).await {
        Ok(added) => Ok(Json(json!({ "data": added }))),
        Err(e) => {
            error!("can't add question via usecase: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn get_question(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<Value>, StatusCode> {
    match state.usecase.get(id).await {
        Ok(Some(question)) => Ok(Json(json!({ "data": question }))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("can't find question {id} via usecase: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn correct_question(
    Path(id): Path<u64>,
    State(state): State<AppState>,
    Json(payload): Json<CorrectQuestionDto>,
) -> Result<Json<Value>, StatusCode> {
    if payload.group_id == Some(0) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut question = match state.usecase.get(id).await {
        Ok(Some(q)) => q,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("can't load question {id} for correction: {e}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if let Some(title) = payload.title {
        question.title = title;
    }
    if let Some(body) = payload.body {
        question.body = body;
    }
    if let Some(group_id) = payload.group_id {
        question.group_id = group_id;
    }

    match state.usecase.correct(&question).await {
        Ok(stored) => Ok(Json(json!({ "data": stored }))),
        Err(e) if matches!(e.store_error(), StoreError::NotFound { .. }) => {
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!("can't correct question via usecase: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn delete_question(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<StatusCode, StatusCode> {
    match state.usecase.delete(&[Condition::id(id)]).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("can't delete question via usecase: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn list_questions(
    Query(params): Query<ListQuestionsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Value>, StatusCode> {
    let mut conditions = Vec::new();
    if let Some(group_id) = params.group_id {
        conditions.push(Condition::eq(Field::GroupId, group_id));
    }
    if let Some(user_id) = params.user_id {
        conditions.push(Condition::eq(Field::UserId, user_id));
    }

    let order = match params.order.as_deref().map(parse_order).transpose() {
        Ok(order) => order.unwrap_or_default(),
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };

    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);

    match state.usecase.find(&conditions, &order, limit, offset).await {
        Ok(page) => Ok(Json(json!({ "data": page.items, "more": page.more }))),
        Err(e) => {
            error!("can't list questions via usecase: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn parse_order(raw: &str) -> Result<Vec<OrderBy>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| clause.parse::<OrderBy>())
        .collect()
}
