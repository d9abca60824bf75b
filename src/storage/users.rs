//! User row accessors.

use chrono::{DateTime, Utc};
use rusqlite::params;

use super::Store;
use crate::error::{FinError, FinResult};
use crate::models::{User, UserId};

impl Store {
    /// Insert a new user row and return its assigned id
    ///
    /// Callers check for an existing username first; the UNIQUE column is
    /// the backstop.
    pub fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        created_at: DateTime<Utc>,
    ) -> FinResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![username, password_hash, created_at.to_rfc3339()],
        )?;

        Ok(UserId::from_raw(self.conn.last_insert_rowid()))
    }

    /// Look up a user by exact username
    pub fn user_by_username(&self, username: &str) -> FinResult<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
        )?;

        let result = stmt.query_row(params![username], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        });

        match result {
            Ok((id, username, password_hash, created_at)) => Ok(Some(User {
                id: UserId::from_raw(id),
                username,
                password_hash,
                created_at: parse_timestamp(&created_at)?,
            })),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a username is already taken (case-sensitive)
    pub fn username_exists(&self, username: &str) -> FinResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

/// Parse an RFC 3339 timestamp column
pub(super) fn parse_timestamp(text: &str) -> FinResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FinError::Storage(format!("Invalid timestamp in row: {}", e)))
}
