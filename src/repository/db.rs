//! Database Connection and Setup
//!
//! Opens the SQLite file backing the menu cache.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared handle to the open database
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl DbState {
    /// Connection shared by all repositories
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Open the database at `db_path` (":memory:" for a private in-memory database)
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| DomainError::StorageInit("Invalid DB path".to_string()))?;

    let conn = Connection::open(db_path_str)
        .map_err(|e| DomainError::StorageInit(format!("Failed to open {}: {}", db_path_str, e)))?;

    conn.busy_timeout(Duration::from_secs(5))
        .map_err(|e| DomainError::StorageInit(e.to_string()))?;

    log::debug!("Opened menu database at {}", db_path_str);

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
        path: db_path.to_path_buf(),
    })
}
