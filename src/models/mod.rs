//! Core data models for fintrack
//!
//! This module contains the data structures that represent the tracker
//! domain: users, ledger transactions, and monthly category budgets.

pub mod budget;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod user;

pub use budget::{Budget, BudgetUpdate};
pub use ids::{BudgetId, TransactionId, UserId};
pub use money::Money;
pub use transaction::{Transaction, TransactionKind};
pub use user::User;
