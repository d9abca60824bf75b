//! User model
//!
//! A registered account holder. The password is never stored; only its
//! salted argon2 hash (PHC string form) is persisted.

use chrono::{DateTime, Utc};

use super::ids::UserId;

/// A registered user
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identity
    pub id: UserId,
    /// Unique, case-sensitive username
    pub username: String,
    /// Salted one-way hash of the password
    pub password_hash: String,
    /// When the user registered
    pub created_at: DateTime<Utc>,
}
