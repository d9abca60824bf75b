//! Ledger service
//!
//! Business logic for a user's transactions: recording, editing, deleting,
//! listing, and the per-kind sum report. Every operation is scoped to the
//! authenticated user; no call can touch another user's rows.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::{FinError, FinResult};
use crate::models::{Money, Transaction, TransactionId, TransactionKind, UserId};
use crate::storage::Store;

/// Service for transaction bookkeeping
pub struct LedgerService<'a> {
    store: &'a Store,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Record a new transaction, returning its assigned id
    ///
    /// The creation timestamp is set here, not supplied by the caller.
    pub fn add(
        &self,
        user_id: UserId,
        kind: TransactionKind,
        amount: Money,
        description: &str,
        category: &str,
    ) -> FinResult<TransactionId> {
        require_positive(amount)?;

        self.store
            .insert_transaction(user_id, kind, amount, description, category, Utc::now())
    }

    /// Change a transaction's amount and description
    ///
    /// Only the owner's rows are reachable; an id that does not exist or
    /// belongs to another user yields `NotFound` and changes nothing.
    pub fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        amount: Money,
        description: &str,
    ) -> FinResult<()> {
        require_positive(amount)?;

        match self.store.update_transaction(user_id, id, amount, description)? {
            0 => Err(FinError::transaction_not_found(id.to_string())),
            _ => Ok(()),
        }
    }

    /// Remove a transaction, with the same scoping as `update`
    pub fn delete(&self, user_id: UserId, id: TransactionId) -> FinResult<()> {
        match self.store.delete_transaction(user_id, id)? {
            0 => Err(FinError::transaction_not_found(id.to_string())),
            _ => Ok(()),
        }
    }

    /// All of the user's transactions, oldest first
    pub fn list(&self, user_id: UserId) -> FinResult<Vec<Transaction>> {
        self.store.transactions_for_user(user_id)
    }

    /// Total amount per transaction kind
    ///
    /// Kinds with no transactions are absent from the result.
    pub fn report(&self, user_id: UserId) -> FinResult<BTreeMap<TransactionKind, Money>> {
        Ok(self.store.sums_by_kind(user_id)?.into_iter().collect())
    }
}

/// Amounts entering the ledger must be strictly positive
fn require_positive(amount: Money) -> FinResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(FinError::Validation(format!(
            "Amount must be positive, got {}",
            amount
        )))
    }
}
