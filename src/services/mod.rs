//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, credential checks, and scoping every operation to
//! the authenticated user.

pub mod auth;
pub mod budget;
pub mod ledger;

pub use auth::AuthService;
pub use budget::BudgetService;
pub use ledger::LedgerService;
