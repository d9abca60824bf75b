//! Budget service
//!
//! Upserts per-(user, category, month, year) budget amounts. The key is
//! matched exactly; repeated sets on the same key replace the amount in
//! the existing row instead of adding another.

use crate::error::{FinError, FinResult};
use crate::models::{budget::month_in_range, BudgetUpdate, Money, UserId};
use crate::storage::Store;

/// Service for monthly category budgets
pub struct BudgetService<'a> {
    store: &'a Store,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Set the budget for a (category, month, year) key
    ///
    /// Returns whether a row was created or an existing one updated.
    /// Category matching is case- and whitespace-sensitive; year is
    /// accepted as given.
    pub fn set_budget(
        &self,
        user_id: UserId,
        category: &str,
        amount: Money,
        month: u32,
        year: i32,
    ) -> FinResult<BudgetUpdate> {
        if !month_in_range(month) {
            return Err(FinError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        if !amount.is_positive() {
            return Err(FinError::Validation(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }

        match self.store.budget_for_key(user_id, category, month, year)? {
            Some(existing) => {
                self.store.update_budget_amount(existing.id, amount)?;
                Ok(BudgetUpdate::Updated)
            }
            None => {
                self.store.insert_budget(user_id, category, amount, month, year)?;
                Ok(BudgetUpdate::Created)
            }
        }
    }
}
