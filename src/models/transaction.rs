//! Transaction model
//!
//! A transaction is a single dated ledger entry owned by exactly one user:
//! either money coming in (income) or going out (expense).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{TransactionId, UserId};
use super::money::Money;

/// Whether a transaction adds to or draws from the user's funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The lowercase storage form ("income" / "expense")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(KindParseError::Unknown(s.trim().to_string())),
        }
    }
}

/// Error type for transaction kind parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindParseError {
    Unknown(String),
}

impl fmt::Display for KindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindParseError::Unknown(s) => {
                write!(f, "Unknown transaction type '{}' (expected income or expense)", s)
            }
        }
    }
}

impl std::error::Error for KindParseError {}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Store-assigned identity
    pub id: TransactionId,
    /// Owning user
    pub user_id: UserId,
    /// Income or expense
    pub kind: TransactionKind,
    /// Amount in cents, always positive
    pub amount: Money,
    /// Free-text description
    pub description: String,
    /// Free-text category
    pub category: String,
    /// Set automatically when the entry is recorded
    pub created_at: DateTime<Utc>,
}
