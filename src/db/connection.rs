use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::cell::RefCell;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// How long a writer waits on a held lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Thread-local connection slot, remembered together with the file it points at.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = const { RefCell::new(None) };
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = !matches!(&*slot, Some((path, _)) if *path == self.path);
                if stale {
                    debug!(path = %self.path, "opening sqlite connection for worker thread");
                    *slot = Some((self.path.clone(), open_connection(&self.path)?));
                }
                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ServerError::InternalError),
                }
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

pub fn open_connection(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<(), ServerError> {
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| ServerError::DbError(format!("busy_timeout failed: {e}")))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| ServerError::DbError(format!("enable foreign keys failed: {e}")))?;
    Ok(())
}

/// Apply the embedded schema to an already open connection.
pub fn apply_schema(conn: &Connection) -> Result<(), ServerError> {
    configure(conn)?;
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
}

/// Initialize the database file from the embedded schema.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| apply_schema(conn))?;
    info!(path = %db.path(), "database initialized");
    Ok(())
}

/// Write transaction that takes the store's write lock up front, so the
/// reads that guard an insert and the insert itself see one snapshot.
pub fn write_tx(conn: &mut Connection) -> Result<Transaction<'_>, ServerError> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))
}

pub fn commit(tx: Transaction<'_>) -> Result<(), ServerError> {
    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))
}

/// Fresh in-memory store with the schema applied.
#[cfg(test)]
pub fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    apply_schema(&conn).unwrap();
    conn
}

/// Temp-file store with the schema applied, for tests that need
/// several connections on one database.
#[cfg(test)]
pub fn temp_db_path(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir()
        .join(format!("board_{tag}_{nanos}.sqlite"))
        .to_string_lossy()
        .into_owned();
    apply_schema(&open_connection(&path).unwrap()).unwrap();
    path
}
