//! The `Question` entity and its field vocabulary.
//!
//! `Field` and `Value` are the typed counterparts of column names and
//! column values. Adapters use them for field-restricted updates and for
//! evaluating query conditions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// A flashcard-like question tracked through the review cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
    /// Assigned by storage on creation; `0` before persistence.
    pub id: u64,
    pub user_id: u64,
    pub group_id: u64,
    pub title: String,
    pub body: String,
    /// Position in the repetition curriculum. Internal, never serialised.
    #[serde(skip)]
    pub step: u8,
    /// When the question is due for review again.
    pub repeat_time: DateTime<Utc>,
    /// Whether the previous review was missed.
    pub is_failed: bool,
}

impl Question {
    /// Unsaved question with the given content; scheduling fields stay zeroed.
    pub fn new(
        user_id: u64,
        group_id: u64,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            group_id,
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Current value of a single field.
    pub fn value(&self, field: Field) -> Value {
        match field {
            Field::Id => Value::U64(self.id),
            Field::UserId => Value::U64(self.user_id),
            Field::GroupId => Value::U64(self.group_id),
            Field::Title => Value::Text(self.title.clone()),
            Field::Body => Value::Text(self.body.clone()),
            Field::Step => Value::Step(self.step),
            Field::RepeatTime => Value::Time(self.repeat_time),
            Field::IsFailed => Value::Bool(self.is_failed),
        }
    }

    /// Project the requested fields into `(field, value)` pairs.
    ///
    /// An empty `fields` slice selects every writable field. `Field::Id` is
    /// never part of the projection: the id is immutable once assigned.
    pub fn values(&self, fields: &[Field]) -> Vec<(Field, Value)> {
        let selected: &[Field] = if fields.is_empty() {
            &Field::WRITABLE
        } else {
            fields
        };

        selected
            .iter()
            .filter(|f| **f != Field::Id)
            .map(|f| (*f, self.value(*f)))
            .collect()
    }

    /// Copy the listed fields from `other` into `self`, with the same
    /// empty-means-all and id-is-immutable rules as [`Question::values`].
    pub fn assign_from(&mut self, other: &Question, fields: &[Field]) {
        let selected: &[Field] = if fields.is_empty() {
            &Field::WRITABLE
        } else {
            fields
        };

        for field in selected {
            match field {
                Field::Id => {}
                Field::UserId => self.user_id = other.user_id,
                Field::GroupId => self.group_id = other.group_id,
                Field::Title => self.title = other.title.clone(),
                Field::Body => self.body = other.body.clone(),
                Field::Step => self.step = other.step,
                Field::RepeatTime => self.repeat_time = other.repeat_time,
                Field::IsFailed => self.is_failed = other.is_failed,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A column of the `questions` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    UserId,
    GroupId,
    Title,
    Body,
    Step,
    RepeatTime,
    IsFailed,
}

impl Field {
    /// Every field except `Id`.
    pub const WRITABLE: [Field; 7] = [
        Field::UserId,
        Field::GroupId,
        Field::Title,
        Field::Body,
        Field::Step,
        Field::RepeatTime,
        Field::IsFailed,
    ];

    /// Database column name.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "user_id",
            Self::GroupId => "group_id",
            Self::Title => "title",
            Self::Body => "body",
            Self::Step => "step",
            Self::RepeatTime => "repeat_time",
            Self::IsFailed => "is_failed",
        }
    }

    /// External (JSON) name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "userId",
            Self::GroupId => "groupId",
            Self::Title => "title",
            Self::Body => "body",
            Self::Step => "step",
            Self::RepeatTime => "repeatTime",
            Self::IsFailed => "isFailed",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    /// Accepts both the JSON name and the column name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id"                         => Ok(Self::Id),
            "userId" | "user_id"         => Ok(Self::UserId),
            "groupId" | "group_id"       => Ok(Self::GroupId),
            "title"                      => Ok(Self::Title),
            "body"                       => Ok(Self::Body),
            "step"                       => Ok(Self::Step),
            "repeatTime" | "repeat_time" => Ok(Self::RepeatTime),
            "isFailed" | "is_failed"     => Ok(Self::IsFailed),
            other                        => Err(format!("unknown question field: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A typed field value, used in conditions and field projections.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U64(u64),
    Text(String),
    Step(u8),
    Time(DateTime<Utc>),
    Bool(bool),
}

impl PartialOrd for Value {
    /// Values of different kinds are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::U64(a), Self::U64(b)) => a.partial_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.partial_cmp(b),
            (Self::Step(a), Self::Step(b)) => a.partial_cmp(b),
            (Self::Time(a), Self::Time(b)) => a.partial_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U64(v)  => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Step(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Step(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v)
    }
}
