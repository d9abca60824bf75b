//! Report formatting utilities for terminal output

use std::collections::BTreeMap;

use crate::models::{Money, TransactionKind};

/// Format the per-kind sum report
///
/// One line per kind present, income before expense.
pub fn format_report(sums: &BTreeMap<TransactionKind, Money>, currency_symbol: &str) -> String {
    if sums.is_empty() {
        return "No transactions to report.\n".to_string();
    }

    let mut output = String::new();
    for (kind, total) in sums {
        output.push_str(&format!(
            "{:8} {}\n",
            format!("{}:", kind),
            total.format_with_symbol(currency_symbol)
        ));
    }

    output
}
