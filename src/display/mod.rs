//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.
//! Formatters return strings; printing is the shell's job.

pub mod report;
pub mod transaction;

pub use report::format_report;
pub use transaction::{format_transaction_register, format_transaction_row};
