//! In-memory credential store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Username};
use crate::ports::{Credential, CredentialStore};

/// Accounts held in a map keyed by username.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<RwLock<HashMap<Username, Credential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts.
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find(&self, username: &Username) -> Result<Option<Credential>, DomainError> {
        Ok(self.credentials.read().await.get(username).cloned())
    }

    async fn insert(&self, credential: &Credential) -> Result<(), DomainError> {
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&credential.username) {
            return Err(DomainError::new(
                ErrorCode::UsernameTaken,
                format!("Username already exists: {}", credential.username),
            )
            .with_detail("username", credential.username.as_str()));
        }
        credentials.insert(credential.username.clone(), credential.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(name: &str) -> Credential {
        Credential::new(Username::new(name).unwrap(), "$2b$04$hash")
    }

    #[tokio::test]
    async fn inserted_credential_can_be_found() {
        let store = InMemoryCredentialStore::new();
        store.insert(&credential("alice")).await.unwrap();

        let found = store.find(&Username::new("alice").unwrap()).await.unwrap();
        assert_eq!(found, Some(credential("alice")));
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        let store = InMemoryCredentialStore::new();
        let found = store.find(&Username::new("nobody").unwrap()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = InMemoryCredentialStore::new();
        store.insert(&credential("alice")).await.unwrap();

        let err = store.insert(&credential("alice")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameTaken);
        assert_eq!(store.len().await, 1);
    }
}
