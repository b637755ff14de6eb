//! Query vocabulary shared by every backend: conditions, ordering and the
//! paginated result page.
//!
//! Pagination protocol: when `limit > 0` a backend asks its engine for
//! `limit + 1` rows ([`fetch_limit`]) and hands the rows to
//! [`Page::from_overfetch`], which trims the extra row and sets `more`.
//! `limit == 0` means "no limit" and `more` is always `false`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::question::{Field, Question, Value};

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// A single filter clause. A list of conditions is AND-ed together.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field = value`
    Eq(Field, Value),
    /// `field IN (values…)`; an empty list matches nothing.
    In(Field, Vec<Value>),
}

impl Condition {
    pub fn eq(field: Field, value: impl Into<Value>) -> Self {
        Self::Eq(field, value.into())
    }

    pub fn any_of<V: Into<Value>>(field: Field, values: impl IntoIterator<Item = V>) -> Self {
        Self::In(field, values.into_iter().map(Into::into).collect())
    }

    /// Shorthand for the primary-key lookup.
    pub fn id(id: u64) -> Self {
        Self::Eq(Field::Id, Value::U64(id))
    }

    /// Evaluate the condition against an in-memory question.
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            Self::Eq(field, value) => question.value(*field) == *value,
            Self::In(field, values) => {
                let actual = question.value(*field);
                values.iter().any(|v| *v == actual)
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq(field, value) => write!(f, "{field} = {value}"),
            Self::In(field, values) => {
                write!(f, "{field} in [")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// True when every condition matches.
pub fn matches_all(conditions: &[Condition], question: &Question) -> bool {
    conditions.iter().all(|c| c.matches(question))
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Sort direction of an order clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One sort clause. Clauses are applied in sequence; the first is primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: Field,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: Field) -> Self {
        Self { field, direction: Direction::Asc }
    }

    pub fn desc(field: Field) -> Self {
        Self { field, direction: Direction::Desc }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{} {dir}", self.field)
    }
}

impl FromStr for OrderBy {
    type Err = String;

    /// Parses `"<field> [asc|desc]"`, e.g. `"id desc"` or `"title"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let field: Field = parts
            .next()
            .ok_or_else(|| "empty order clause".to_string())?
            .parse()?;

        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => Direction::Asc,
            Some("desc") => Direction::Desc,
            Some(other) => return Err(format!("unknown sort direction: {other}")),
        };

        if let Some(extra) = parts.next() {
            return Err(format!("unexpected token in order clause: {extra}"));
        }

        Ok(Self { field, direction })
    }
}

/// Compare two questions by a sequence of order clauses.
pub fn compare(order: &[OrderBy], a: &Question, b: &Question) -> Ordering {
    for clause in order {
        let ord = a
            .value(clause.field)
            .partial_cmp(&b.value(clause.field))
            .unwrap_or(Ordering::Equal);
        let ord = match clause.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Number of rows a backend must request for a given page `limit`.
///
/// `None` means unlimited. A limit with no room for the extra row is
/// already unbounded, so it also maps to `None`.
pub fn fetch_limit(limit: usize) -> Option<usize> {
    if limit == 0 {
        return None;
    }
    limit.checked_add(1)
}

/// One page of a filtered listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Question>,
    /// More matching records exist beyond this page.
    pub more: bool,
}

impl Page {
    /// Build a page from rows fetched with [`fetch_limit`].
    pub fn from_overfetch(mut items: Vec<Question>, limit: usize) -> Self {
        let more = limit > 0 && items.len() > limit;
        if more {
            items.truncate(limit);
        }
        Self { items, more }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
