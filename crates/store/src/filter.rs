//! Typed construction of backend filter expressions.
//!
//! The backend accepts a small boolean expression language over record
//! fields. Only the operators this application actually uses are modeled:
//! equality, AND, and OR. Building filters through [`Filter`] keeps quoting
//! and escaping in one place and lets the in-memory store evaluate the same
//! expression the HTTP store renders.

use serde_json::Value;

/// A filter expression over record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Field equals a literal value.
    Eq(String, Literal),
    /// All sub-filters must match.
    And(Vec<Filter>),
    /// At least one sub-filter must match.
    Or(Vec<Filter>),
}

/// A literal on the right-hand side of an equality filter.
///
/// The backend distinguishes quoted string literals from bare boolean
/// literals; a boolean field never matches a quoted string, so boolean
/// comparisons must go through [`Filter::eq_bool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Quoted string literal.
    Str(String),
    /// Bare boolean literal.
    Bool(bool),
}

impl Filter {
    /// Field-equals-string filter.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq(field.into(), Literal::Str(value.into()))
    }

    /// Field-equals-boolean filter.
    #[must_use]
    pub fn eq_bool(field: impl Into<String>, value: bool) -> Self {
        Self::Eq(field.into(), Literal::Bool(value))
    }

    /// Conjunction of filters.
    #[must_use]
    pub fn and(parts: impl IntoIterator<Item = Self>) -> Self {
        Self::And(parts.into_iter().collect())
    }

    /// Disjunction of filters.
    #[must_use]
    pub fn or(parts: impl IntoIterator<Item = Self>) -> Self {
        Self::Or(parts.into_iter().collect())
    }

    /// Renders the filter in the backend's string syntax.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Eq(field, Literal::Str(value)) => {
                format!("{field} = '{}'", value.replace('\'', "\\'"))
            }
            Self::Eq(field, Literal::Bool(value)) => format!("{field} = {value}"),
            Self::And(parts) => Self::render_group(parts, " && "),
            Self::Or(parts) => Self::render_group(parts, " || "),
        }
    }

    fn render_group(parts: &[Self], sep: &str) -> String {
        let rendered: Vec<String> = parts.iter().map(Self::render).collect();
        format!("({})", rendered.join(sep))
    }

    /// Evaluates the filter against a record.
    ///
    /// Used by the in-memory store, mirroring the backend's comparison
    /// rules: a boolean literal matches only a boolean field, a string
    /// literal never matches a boolean field, numbers compare by their
    /// decimal rendering, and an absent or null field compares equal to
    /// the empty string.
    #[must_use]
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Self::Eq(field, literal) => matches_eq(record.get(field), literal),
            Self::And(parts) => parts.iter().all(|p| p.matches(record)),
            Self::Or(parts) => parts.iter().any(|p| p.matches(record)),
        }
    }
}

fn matches_eq(value: Option<&Value>, literal: &Literal) -> bool {
    match (value, literal) {
        (Some(Value::Bool(field)), Literal::Bool(want)) => field == want,
        (_, Literal::Bool(_)) | (Some(Value::Bool(_)), Literal::Str(_)) => false,
        (value, Literal::Str(want)) => field_as_string(value) == *want,
    }
}

fn field_as_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Parameters for a list query against a collection.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Optional filter expression.
    pub filter: Option<Filter>,
    /// Optional sort key; a leading `-` means descending (e.g. `-created`).
    pub sort: Option<String>,
    /// Optional field projection.
    pub fields: Option<Vec<String>>,
    /// Optional maximum number of records to return.
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Empty query matching every record in the collection.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Sets the filter expression.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Restricts the returned fields.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Caps the number of returned records.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
