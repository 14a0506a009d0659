//! Generic row, filter and ordering types shared by every store.

use std::cmp::Ordering;

use serde_json::Value;

use crate::StorageError;

/// A row as a JSON object keyed by column name.
pub type Row = serde_json::Map<String, Value>;

/// Row predicate. A list of filters is a conjunction.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Column equals value. `Value::Null` matches SQL NULL.
    Eq { column: String, value: Value },
    /// Case-insensitive substring match on a text column.
    Contains { column: String, needle: String },
    /// Disjunction. Empty matches nothing.
    Any(Vec<Filter>),
}

impl Filter {
    #[must_use]
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::Eq { column: column.to_owned(), value: value.into() }
    }

    #[must_use]
    pub fn contains(column: &str, needle: &str) -> Self {
        Self::Contains { column: column.to_owned(), needle: needle.to_owned() }
    }

    #[must_use]
    pub fn any(filters: Vec<Filter>) -> Self {
        Self::Any(filters)
    }

    /// Evaluates the filter against an in-memory row.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Eq { column, value: Value::Null } => {
                row.get(column).is_none_or(Value::is_null)
            },
            Self::Eq { column, value } => row.get(column) == Some(value),
            Self::Contains { column, needle } => row
                .get(column)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
            Self::Any(filters) => filters.iter().any(|f| f.matches(row)),
        }
    }

    /// Rejects filters naming columns that are not plain identifiers.
    pub fn validate(&self) -> Result<(), StorageError> {
        match self {
            Self::Eq { column, .. } | Self::Contains { column, .. } => validate_identifier(column),
            Self::Any(filters) => filters.iter().try_for_each(Filter::validate),
        }
    }
}

/// Sort order for a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    /// Compares two rows on this column. Nulls sort last when ascending.
    #[must_use]
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let ord = compare_values(a.get(&self.column), b.get(&self.column));
        if self.ascending { ord } else { ord.reverse() }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

/// Filters, ordering and limit of a `select`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowQuery {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl RowQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order { column: column.to_owned(), ascending });
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a row passes every filter.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    pub fn validate(&self) -> Result<(), StorageError> {
        self.filters.iter().try_for_each(Filter::validate)?;
        if let Some(order) = &self.order {
            validate_identifier(&order.column)?;
        }
        Ok(())
    }
}

/// Table and column names are interpolated into SQL, so only
/// `[a-z_][a-z0-9_]*` is accepted.
pub fn validate_identifier(name: &str) -> Result<(), StorageError> {
    let mut chars = name.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        Ok(())
    } else {
        Err(StorageError::InvalidIdentifier(name.to_owned()))
    }
}

/// Escapes `LIKE` metacharacters so the needle matches literally.
#[must_use]
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
