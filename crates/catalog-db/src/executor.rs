//! # SQL Executor
//!
//! The capability the service layer runs SQL through.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  execute(statement, params) -> QueryOutcome                             │
//! │                                                                         │
//! │  statement: fixed template with `?` placeholders                       │
//! │  params:    positional SqlValues, one per placeholder                  │
//! │                                                                         │
//! │  SELECT ...           ──► QueryOutcome::Rows(Vec<Record>)              │
//! │  INSERT/UPDATE/DELETE ──► QueryOutcome::Mutation { affected_rows }     │
//! │                                                                         │
//! │  One call = one pooled connection checkout = one statement.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! User input only ever travels in `params`. The trait has no way to splice
//! values into the statement text.

use async_trait::async_trait;

use crate::error::{DbError, DbResult};

// =============================================================================
// Capability
// =============================================================================

/// Executes a single parameterized statement.
///
/// Implemented by [`crate::Database`] for MySQL, and by test doubles in the
/// consuming crates.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn execute(&self, statement: &str, params: Vec<SqlValue>) -> DbResult<QueryOutcome>;

    /// Round trip to storage; `Ok` means it answered.
    async fn health_check(&self) -> DbResult<()> {
        self.execute("SELECT 1", Vec::new()).await.map(|_| ())
    }
}

// =============================================================================
// Statement Kind
// =============================================================================

/// Whether a statement yields rows or an affected-row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Rows,
    Mutation,
}

impl StatementKind {
    /// Classifies a statement by its leading keyword.
    pub fn classify(statement: &str) -> Self {
        let keyword = statement
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default();

        if ["SELECT", "SHOW", "WITH", "DESCRIBE", "DESC", "EXPLAIN"]
            .iter()
            .any(|k| keyword.eq_ignore_ascii_case(k))
        {
            StatementKind::Rows
        } else {
            StatementKind::Mutation
        }
    }
}

// =============================================================================
// Values
// =============================================================================

/// A single bound parameter or decoded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl SqlValue {
    fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Int(_) => "Int",
            SqlValue::UInt(_) => "UInt",
            SqlValue::Float(_) => "Float",
            SqlValue::Bool(_) => "Bool",
            SqlValue::Text(_) => "Text",
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        SqlValue::UInt(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

// =============================================================================
// Record
// =============================================================================

/// One decoded row, columns kept in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, SqlValue)>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Appends a column.
    pub fn push(&mut self, name: impl Into<String>, value: SqlValue) {
        self.columns.push((name.into(), value));
    }

    /// Builder-style [`Record::push`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn require(&self, name: &str) -> DbResult<&SqlValue> {
        self.get(name)
            .ok_or_else(|| DbError::decode(name, "column missing from result set"))
    }

    /// Reads an unsigned integer column (e.g. an AUTO_INCREMENT id).
    pub fn get_u64(&self, name: &str) -> DbResult<u64> {
        match self.require(name)? {
            SqlValue::UInt(v) => Ok(*v),
            SqlValue::Int(v) => u64::try_from(*v)
                .map_err(|_| DbError::decode(name, format!("negative value {}", v))),
            other => Err(DbError::decode(
                name,
                format!("expected an unsigned integer, found {}", other.type_name()),
            )),
        }
    }

    /// Reads a signed integer column. Booleans read as 1/0.
    pub fn get_i64(&self, name: &str) -> DbResult<i64> {
        match self.require(name)? {
            SqlValue::Int(v) => Ok(*v),
            SqlValue::UInt(v) => {
                i64::try_from(*v).map_err(|_| DbError::decode(name, format!("{} overflows i64", v)))
            }
            SqlValue::Bool(v) => Ok(i64::from(*v)),
            other => Err(DbError::decode(
                name,
                format!("expected an integer, found {}", other.type_name()),
            )),
        }
    }

    /// Reads a text column.
    pub fn get_str(&self, name: &str) -> DbResult<&str> {
        match self.require(name)? {
            SqlValue::Text(v) => Ok(v),
            other => Err(DbError::decode(
                name,
                format!("expected text, found {}", other.type_name()),
            )),
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// What a statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Rows from a SELECT-like statement.
    Rows(Vec<Record>),

    /// Result of an INSERT / UPDATE / DELETE.
    Mutation {
        affected_rows: u64,
        last_insert_id: u64,
    },
}

impl QueryOutcome {
    /// Mutation outcome with no generated id.
    pub fn affected(affected_rows: u64) -> Self {
        QueryOutcome::Mutation {
            affected_rows,
            last_insert_id: 0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_statements() {
        assert_eq!(
            StatementKind::classify("SELECT id FROM products"),
            StatementKind::Rows
        );
        assert_eq!(
            StatementKind::classify("  select 1"),
            StatementKind::Rows
        );
        assert_eq!(
            StatementKind::classify("\n  WITH x AS (SELECT 1) SELECT * FROM x"),
            StatementKind::Rows
        );
        assert_eq!(
            StatementKind::classify("INSERT INTO products (sku) VALUES (?)"),
            StatementKind::Mutation
        );
        assert_eq!(
            StatementKind::classify("DELETE FROM products WHERE id=?"),
            StatementKind::Mutation
        );
        assert_eq!(
            StatementKind::classify("UPDATE products SET name=? WHERE sku=?"),
            StatementKind::Mutation
        );
    }

    #[test]
    fn test_option_becomes_null() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("ABC123")), SqlValue::Text("ABC123".into()));
        assert_eq!(SqlValue::from(Some(3i64)), SqlValue::Int(3));
    }

    #[test]
    fn test_record_getters() {
        let record = Record::new()
            .with("id", 7u64)
            .with("sku", "ABC123")
            .with("in_stock", true);

        assert_eq!(record.get_u64("id").unwrap(), 7);
        assert_eq!(record.get_str("sku").unwrap(), "ABC123");
        assert_eq!(record.get_i64("in_stock").unwrap(), 1);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_record_getter_errors() {
        let record = Record::new().with("id", -1i64).with("name", 5i64);

        assert!(matches!(record.get_u64("id"), Err(DbError::Decode { .. })));
        assert!(matches!(record.get_str("name"), Err(DbError::Decode { .. })));
        assert!(matches!(record.get_str("missing"), Err(DbError::Decode { .. })));
    }
}
