//! Budget model
//!
//! Tracks how much money a user plans to spend on a category in a given
//! month. At most one budget row exists per (user, category, month, year);
//! setting the same key again replaces the amount in place.

use serde::{Deserialize, Serialize};

use super::ids::{BudgetId, UserId};
use super::money::Money;

/// Smallest valid budget month
pub const MONTH_MIN: u32 = 1;
/// Largest valid budget month
pub const MONTH_MAX: u32 = 12;

/// A per-category monthly budget
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    /// Store-assigned identity, stable across amount updates
    pub id: BudgetId,
    /// Owning user
    pub user_id: UserId,
    /// Category name, matched exactly when upserting
    pub category: String,
    /// Budgeted amount in cents
    pub amount: Money,
    /// Calendar month, 1-12
    pub month: u32,
    /// Calendar year, accepted as given
    pub year: i32,
}

/// Outcome of a budget set operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetUpdate {
    /// No row existed for the key; one was inserted
    Created,
    /// A row existed; its amount was replaced
    Updated,
}

/// Check that a month number is within the calendar range
pub fn month_in_range(month: u32) -> bool {
    (MONTH_MIN..=MONTH_MAX).contains(&month)
}
