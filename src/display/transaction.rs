//! Transaction display formatting
//!
//! Provides utilities for formatting a user's ledger for terminal display.

use crate::models::Transaction;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, date_format: &str) -> String {
    format!(
        "{:>5}  {:10}  {:7}  {:>12}  {:15}  {}",
        txn.id,
        txn.created_at.format(date_format).to_string(),
        txn.kind,
        txn.amount,
        truncate(&txn.category, 15),
        txn.description,
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:10}  {:7}  {:>12}  {:15}  {}\n",
        "ID", "Date", "Type", "Amount", "Category", "Description"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, date_format));
        output.push('\n');
    }

    output
}

/// Truncate a string to a maximum length
pub(super) fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
