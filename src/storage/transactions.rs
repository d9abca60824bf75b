//! Transaction row accessors.

use chrono::{DateTime, Utc};
use rusqlite::params;

use super::users::parse_timestamp;
use super::Store;
use crate::error::{FinError, FinResult};
use crate::models::{Money, Transaction, TransactionId, TransactionKind, UserId};

impl Store {
    /// Insert a new ledger entry and return its assigned id
    pub fn insert_transaction(
        &self,
        user_id: UserId,
        kind: TransactionKind,
        amount: Money,
        description: &str,
        category: &str,
        created_at: DateTime<Utc>,
    ) -> FinResult<TransactionId> {
        self.conn.execute(
            "INSERT INTO transactions (user_id, kind, amount_cents, description, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id.as_i64(),
                kind.as_str(),
                amount.cents(),
                description,
                category,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(TransactionId::from_raw(self.conn.last_insert_rowid()))
    }

    /// Set a transaction's amount and description
    ///
    /// The match is scoped to (id AND user_id), so a row owned by another
    /// user is never touched. Returns the number of rows affected (0 or 1).
    pub fn update_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
        amount: Money,
        description: &str,
    ) -> FinResult<usize> {
        let affected = self.conn.execute(
            "UPDATE transactions SET amount_cents = ?1, description = ?2
             WHERE id = ?3 AND user_id = ?4",
            params![amount.cents(), description, id.as_i64(), user_id.as_i64()],
        )?;

        Ok(affected)
    }

    /// Remove a transaction, scoped like `update_transaction`
    pub fn delete_transaction(&self, user_id: UserId, id: TransactionId) -> FinResult<usize> {
        let affected = self.conn.execute(
            "DELETE FROM transactions WHERE id = ?1 AND user_id = ?2",
            params![id.as_i64(), user_id.as_i64()],
        )?;

        Ok(affected)
    }

    /// All of a user's transactions, oldest first
    pub fn transactions_for_user(&self, user_id: UserId) -> FinResult<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, kind, amount_cents, description, category, created_at
             FROM transactions WHERE user_id = ?1
             ORDER BY created_at ASC, id ASC",
        )?;

        let rows = stmt.query_map(params![user_id.as_i64()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut transactions = Vec::new();
        for row in rows {
            let (id, user_id, kind, cents, description, category, created_at) = row?;
            transactions.push(Transaction {
                id: TransactionId::from_raw(id),
                user_id: UserId::from_raw(user_id),
                kind: parse_kind(&kind)?,
                amount: Money::from_cents(cents),
                description,
                category,
                created_at: parse_timestamp(&created_at)?,
            });
        }

        Ok(transactions)
    }

    /// Sum amounts per transaction kind for one user
    ///
    /// Only kinds with at least one transaction appear.
    pub fn sums_by_kind(&self, user_id: UserId) -> FinResult<Vec<(TransactionKind, Money)>> {
        let mut stmt = self.conn.prepare(
            "SELECT kind, SUM(amount_cents) FROM transactions
             WHERE user_id = ?1 GROUP BY kind",
        )?;

        let rows = stmt.query_map(params![user_id.as_i64()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut sums = Vec::new();
        for row in rows {
            let (kind, cents) = row?;
            sums.push((parse_kind(&kind)?, Money::from_cents(cents)));
        }

        Ok(sums)
    }
}

/// Parse a kind column back into the enum
fn parse_kind(text: &str) -> FinResult<TransactionKind> {
    text.parse()
        .map_err(|e| FinError::Storage(format!("Invalid kind in row: {}", e)))
}
