//! Request and response shapes for the query gateway.
//!
//! A statement is an ordered list of SQL text fragments plus a flat list of
//! positional bind arguments. Fragments are joined with a single space right
//! before execution, so long statements can be composed from constants.

use std::collections::HashMap;

use rusqlite::types::{FromSql, Value, ValueRef};

use crate::error::{StoreError, StoreResult};

/// Builds the bind-argument vector for a [`Query`].
///
/// Accepts anything `rusqlite::types::Value` converts from (owned strings,
/// integers, options).
#[macro_export]
macro_rules! sql_args {
    () => { Vec::new() };
    ($($arg:expr),+ $(,)?) => { vec![$(rusqlite::types::Value::from($arg)),+] };
}

/// One parameterized SQL statement.
#[derive(Debug, Clone)]
pub struct Query {
    sql: Vec<String>,
    args: Vec<Value>,
}

impl Query {
    pub fn new<S: AsRef<str>>(sql: &[S]) -> Self {
        Self::with_args(sql, Vec::new())
    }

    pub fn with_args<S: AsRef<str>>(sql: &[S], args: Vec<Value>) -> Self {
        Query {
            sql: sql.iter().map(|fragment| fragment.as_ref().to_string()).collect(),
            args,
        }
    }

    /// The executable statement text.
    pub fn text(&self) -> String {
        self.sql.join(" ")
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// One result row: a mapping from column name to scalar value.
#[derive(Debug, Clone)]
pub struct SqlRow {
    values: HashMap<String, Value>,
}

impl SqlRow {
    pub(crate) fn new(values: HashMap<String, Value>) -> Self {
        SqlRow { values }
    }

    /// Typed accessor for a column. A missing column or a value of the
    /// wrong type is an error; a SQL NULL read into an `Option` is `None`.
    pub fn get<T: FromSql>(&self, column: &str) -> StoreResult<T> {
        let value = self
            .values
            .get(column)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))?;
        T::column_result(ValueRef::from(value)).map_err(|source| StoreError::BadColumn {
            column: column.to_string(),
            source,
        })
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|name| name.as_str())
    }
}

/// Outcome of a single executed statement.
///
/// `rows` is populated for statements that return a result set; write
/// statements report `rows_affected` and the connection's last insert
/// rowid instead.
#[derive(Debug, Clone)]
pub struct StatementResult {
    pub rows: Vec<SqlRow>,
    pub rows_affected: usize,
    pub last_insert_id: Option<i64>,
}
