//! Database layer for the to-do store.

pub mod tasks;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Default time SQLite waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Database handle wrapping a SQLite connection.
///
/// Acquired once at startup and held for the life of the process. Writers in
/// other processes are not coordinated beyond SQLite's own locking; contention
/// that outlasts the busy timeout surfaces as a storage error.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open or create the database, waiting at most `busy_timeout_ms` on locks.
    pub fn open_with_timeout<P: AsRef<Path>>(path: P, busy_timeout_ms: u64) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;

        debug!(path = %path.display(), "Opened task database");
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;

        Ok(db)
    }

    /// Bring the schema up to date. Safe to call on every startup.
    pub fn init(&self) -> Result<()> {
        let mut conn = self.lock();
        let report = embedded::migrations::runner().run(&mut *conn)?;
        for migration in report.applied_migrations() {
            info!(version = migration.version(), name = %migration.name(), "Applied migration");
        }
        if report.applied_migrations().is_empty() {
            debug!("Schema already up to date");
        }
        Ok(())
    }

    /// Execute a function with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.lock();
        f(&conn)
    }

    // A panic while holding the lock cannot leave a half-applied write behind,
    // since every mutation is a single statement, so the guard is reused.
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
