//! Error taxonomy for the storage layer.
//!
//! Engine failures, unexpected result shapes, and schema version conflicts
//! are distinct variants; "row not found" is not an error and is expressed
//! as `Ok(None)` by the stores.

use thiserror::Error;

/// Errors surfaced by the gateway and the entity stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The engine rejected or failed a statement (constraint violation,
    /// malformed SQL, I/O fault).
    #[error("sql execution failed: {0}")]
    Engine(#[from] rusqlite::Error),

    /// A successful execution produced no result where one was expected.
    /// This is a fault, not an empty set.
    #[error("statement produced no result where one was expected")]
    MissingResult,

    /// A result row lacks a column the caller relies on.
    #[error("result row is missing column '{0}'")]
    MissingColumn(String),

    /// A column held a value that does not convert to the requested type.
    #[error("column '{column}' holds an unexpected value")]
    BadColumn {
        column: String,
        #[source]
        source: rusqlite::types::FromSqlError,
    },

    /// The database file records a schema version newer than this build
    /// understands.
    #[error("table '{table}' is at schema version {found}, newer than supported version {supported}")]
    SchemaTooNew {
        table: String,
        found: u32,
        supported: u32,
    },
}

impl StoreError {
    /// Whether this error is a SQLite constraint violation (foreign key,
    /// unique, not-null).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Engine(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
