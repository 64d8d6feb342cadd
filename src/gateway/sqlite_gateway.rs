//! The single point of execution for all SQL against the library database.
//!
//! The gateway exclusively owns the connection; stores and bootstrap submit
//! [`Query`] values and get back per-statement results or a structured
//! error. Concurrent callers serialize on the connection mutex, and within
//! one batch statements execute in the order supplied.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use tracing::{info, warn};

use super::query::{Query, SqlRow, StatementResult};
use crate::error::{StoreError, StoreResult};

/// Invoked after every executed batch with the database file path. Failures
/// are logged and never reach the caller of the batch.
pub type AfterExecHook = Box<dyn Fn(&Path) -> anyhow::Result<()> + Send + Sync>;

/// Gateway behavior knobs.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// When true, every batch runs inside a single transaction: if any
    /// statement fails, the whole batch rolls back. When false, statements
    /// run back-to-back with the engine's per-statement transactions and
    /// statements before the failing one persist.
    pub transactional_batches: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            transactional_batches: true,
        }
    }
}

pub struct SqliteGateway {
    conn: Arc<Mutex<Connection>>,
    db_path: Option<PathBuf>,
    transactional_batches: bool,
    after_exec_hook: Option<AfterExecHook>,
}

impl SqliteGateway {
    /// Open (creating if missing) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, config: GatewayConfig) -> StoreResult<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        info!("Opened library database at {}", path.as_ref().display());
        Ok(SqliteGateway {
            conn: Arc::new(Mutex::new(conn)),
            db_path: Some(path.as_ref().to_path_buf()),
            transactional_batches: config.transactional_batches,
            after_exec_hook: None,
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory(config: GatewayConfig) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(SqliteGateway {
            conn: Arc::new(Mutex::new(conn)),
            db_path: None,
            transactional_batches: config.transactional_batches,
            after_exec_hook: None,
        })
    }

    /// Install a hook to run after each executed batch (e.g. exporting the
    /// database file in a development build). The hook cannot fail the
    /// operation that triggered it.
    pub fn with_after_exec<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.after_exec_hook = Some(Box::new(hook));
        self
    }

    /// Execute a single statement. A one-element batch under the hood; a
    /// batch that comes back empty despite not erroring is reported as
    /// [`StoreError::MissingResult`] rather than coerced into an empty set.
    pub fn exec(&self, query: &Query) -> StoreResult<StatementResult> {
        let results = self.exec_batch(std::slice::from_ref(query))?;
        results.into_iter().next().ok_or(StoreError::MissingResult)
    }

    /// Execute all statements as one request, in order. Exactly one of the
    /// error or the per-statement results is produced.
    pub fn exec_batch(&self, queries: &[Query]) -> StoreResult<Vec<StatementResult>> {
        let outcome = {
            let conn = self.conn.lock().unwrap();
            if self.transactional_batches {
                run_all_transactional(&conn, queries)
            } else {
                run_all(&conn, queries)
            }
        };
        self.run_after_exec_hook();
        outcome.map_err(StoreError::from)
    }

    /// Turn on foreign-key constraint enforcement for this connection. The
    /// engine defaults this off; call once before any write that relies on
    /// referential integrity.
    pub fn enable_foreign_keys(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        // The pragma is a no-op inside a transaction, so it goes straight to
        // the connection instead of through the batch path.
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(())
    }

    fn run_after_exec_hook(&self) {
        if let (Some(hook), Some(path)) = (&self.after_exec_hook, &self.db_path) {
            if let Err(e) = hook(path) {
                warn!("post-execution hook failed: {:#}", e);
            }
        }
    }
}

fn run_all_transactional(
    conn: &Connection,
    queries: &[Query],
) -> Result<Vec<StatementResult>, rusqlite::Error> {
    let tx = conn.unchecked_transaction()?;
    let results = run_all(&tx, queries)?;
    tx.commit()?;
    Ok(results)
}

fn run_all(conn: &Connection, queries: &[Query]) -> Result<Vec<StatementResult>, rusqlite::Error> {
    queries.iter().map(|query| run_statement(conn, query)).collect()
}

fn run_statement(conn: &Connection, query: &Query) -> Result<StatementResult, rusqlite::Error> {
    let sql = query.text();
    let mut stmt = conn.prepare(&sql)?;

    if stmt.column_count() == 0 {
        // Write statement: no result set, report affected rows and the
        // connection's last insert rowid.
        let rows_affected = stmt.execute(params_from_iter(query.args().iter()))?;
        return Ok(StatementResult {
            rows: Vec::new(),
            rows_affected,
            last_insert_id: Some(conn.last_insert_rowid()),
        });
    }

    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut rows = stmt.query(params_from_iter(query.args().iter()))?;
    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = HashMap::with_capacity(column_names.len());
        for (index, name) in column_names.iter().enumerate() {
            let value: Value = row.get_ref(index)?.into();
            values.insert(name.clone(), value);
        }
        collected.push(SqlRow::new(values));
    }
    Ok(StatementResult {
        rows: collected,
        rows_affected: 0,
        last_insert_id: None,
    })
}
