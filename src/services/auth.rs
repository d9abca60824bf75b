//! Credential service
//!
//! Registers users and checks login credentials. Passwords are stored as
//! salted argon2 hashes; verification compares against the stored hash and
//! never against plaintext.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use tracing::debug;

use crate::error::{FinError, FinResult};
use crate::models::UserId;
use crate::storage::Store;

/// Why an authentication attempt failed
///
/// Callers only ever see `Ok(None)`; the distinction exists for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthFailure {
    UnknownUser,
    BadPassword,
}

/// Service for registration and login
pub struct AuthService<'a> {
    store: &'a Store,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Register a new user
    ///
    /// Fails with `Duplicate` if the username (case-sensitive) is taken.
    pub fn register(&self, username: &str, password: &str) -> FinResult<UserId> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FinError::Validation("Username cannot be empty".into()));
        }
        if password.is_empty() {
            return Err(FinError::Validation("Password cannot be empty".into()));
        }

        if self.store.username_exists(username)? {
            return Err(FinError::duplicate_user(username));
        }

        let hash = hash_password(password)?;
        let id = self.store.insert_user(username, &hash, Utc::now())?;
        debug!(%username, %id, "registered user");

        Ok(id)
    }

    /// Check credentials and return the user's identity on success
    ///
    /// Returns `Ok(None)` both when the username is unknown and when the
    /// password does not match, so callers cannot tell the two apart. The
    /// cause is recorded at debug level only.
    pub fn authenticate(&self, username: &str, password: &str) -> FinResult<Option<UserId>> {
        let username = username.trim();

        let user = match self.store.user_by_username(username)? {
            Some(user) => user,
            None => {
                debug!(%username, cause = ?AuthFailure::UnknownUser, "login rejected");
                return Ok(None);
            }
        };

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| FinError::Crypto(format!("Stored hash is unreadable: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(Some(user.id)),
            Err(argon2::password_hash::Error::Password) => {
                debug!(%username, cause = ?AuthFailure::BadPassword, "login rejected");
                Ok(None)
            }
            Err(e) => Err(FinError::Crypto(format!("Password verification failed: {}", e))),
        }
    }
}

/// Hash a password with a fresh random salt, returning the PHC string
fn hash_password(password: &str) -> FinResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FinError::Crypto(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> Store {
        Store::open_in_memory().unwrap()
    }

    #[test]
    fn test_register_and_authenticate() {
        let store = test_store();
        let auth = AuthService::new(&store);

        let id = auth.register("testuser", "testpassword").unwrap();

        assert_eq!(auth.authenticate("testuser", "testpassword").unwrap(), Some(id));
        assert_eq!(auth.authenticate("testuser", "wrongpassword").unwrap(), None);
        assert_eq!(auth.authenticate("nobody", "testpassword").unwrap(), None);
    }

    #[test]
    fn test_register_duplicate_username() {
        let store = test_store();
        let auth = AuthService::new(&store);

        let first = auth.register("testuser", "testpassword").unwrap();
        let err = auth.register("testuser", "otherpassword").unwrap_err();
        assert!(err.is_duplicate());

        // The original registration is untouched.
        let user = store.user_by_username("testuser").unwrap().unwrap();
        assert_eq!(user.id, first);
        assert_eq!(auth.authenticate("testuser", "testpassword").unwrap(), Some(first));
    }

    #[test]
    fn test_register_trims_username() {
        let store = test_store();
        let auth = AuthService::new(&store);

        let id = auth.register("  alice  ", "pw").unwrap();
        assert_eq!(auth.authenticate("alice", "pw").unwrap(), Some(id));
        assert_eq!(auth.authenticate(" alice ", "pw").unwrap(), Some(id));
    }

    #[test]
    fn test_register_rejects_empty_input() {
        let store = test_store();
        let auth = AuthService::new(&store);

        assert!(auth.register("", "pw").unwrap_err().is_validation());
        assert!(auth.register("   ", "pw").unwrap_err().is_validation());
        assert!(auth.register("alice", "").unwrap_err().is_validation());
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let store = test_store();
        let auth = AuthService::new(&store);

        let alice = auth.register("alice", "pw1").unwrap();
        let alice_caps = auth.register("Alice", "pw2").unwrap();
        assert_ne!(alice, alice_caps);

        assert_eq!(auth.authenticate("alice", "pw1").unwrap(), Some(alice));
        assert_eq!(auth.authenticate("Alice", "pw2").unwrap(), Some(alice_caps));
        assert_eq!(auth.authenticate("Alice", "pw1").unwrap(), None);
    }

    #[test]
    fn test_stored_hash_is_not_plaintext() {
        let store = test_store();
        let auth = AuthService::new(&store);

        auth.register("alice", "hunter2").unwrap();
        let user = store.user_by_username("alice").unwrap().unwrap();
        assert!(user.password_hash.starts_with("$argon2"));
        assert!(!user.password_hash.contains("hunter2"));
    }
}
