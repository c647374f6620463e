//! Credential store port.
//!
//! Accounts are keyed by username. Only the bcrypt hash of a password is
//! ever handed to the store.

use crate::domain::foundation::{DomainError, Username};
use async_trait::async_trait;

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: Username,
    pub password_hash: String,
}

impl Credential {
    pub fn new(username: Username, password_hash: impl Into<String>) -> Self {
        Self {
            username,
            password_hash: password_hash.into(),
        }
    }
}

/// Store port for account credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the credential for a username.
    ///
    /// Returns `None` if no such account exists.
    async fn find(&self, username: &Username) -> Result<Option<Credential>, DomainError>;

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `UsernameTaken` if the username already exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, credential: &Credential) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CredentialStore) {}
    }
}
