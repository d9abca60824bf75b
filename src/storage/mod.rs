//! Storage layer for fintrack
//!
//! A single SQLite database holds all state. The connection is opened once
//! at startup and handed to the services; no operation opens its own.

pub mod budgets;
pub mod schema;
pub mod transactions;
pub mod users;

pub use schema::{ensure_schema, CREATE_SCHEMA, SCHEMA_VERSION};

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::{FinError, FinResult};

/// Handle to the open database
///
/// Owns the one connection the process uses. Typed row accessors are
/// implemented per entity in the sibling modules.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database at `path` and make sure the schema
    /// exists
    pub fn open(path: &Path) -> FinResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FinError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| FinError::Storage(format!("Failed to open database: {}", e)))?;

        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> FinResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| FinError::Storage(format!("Failed to open database: {}", e)))?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> FinResult<Self> {
        // The schema declares references between tables; SQLite only
        // enforces them with the pragma on.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::ensure_schema(&conn)?;
        debug!("database ready");

        Ok(Self { conn })
    }

    /// Close the connection, releasing the database file
    ///
    /// The shell calls this before backup and restore copy the file.
    pub fn close(self) -> FinResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| FinError::Storage(format!("Failed to close database: {}", e)))
    }
}
