//! Database schema definitions.

use rusqlite::Connection;

use crate::error::FinResult;

/// Schema version recorded in settings for migration support.
pub const SCHEMA_VERSION: u32 = 1;

/// SQL to create the database schema.
///
/// Every statement is idempotent, so running this against an existing
/// database is a no-op.
pub const CREATE_SCHEMA: &str = r#"
-- Registered account holders
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Ledger entries, one owner each
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    kind TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_user ON transactions(user_id);

-- Monthly category budgets; the (user_id, category, month, year) key is
-- kept unique by the upsert logic, not by a constraint here
CREATE TABLE IF NOT EXISTS budgets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    category TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    month INTEGER NOT NULL,
    year INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_budgets_key ON budgets(user_id, category, month, year);
"#;

/// Create the users, transactions, and budgets tables if absent.
pub fn ensure_schema(conn: &Connection) -> FinResult<()> {
    conn.execute_batch(CREATE_SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'transactions', 'budgets')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }
}
