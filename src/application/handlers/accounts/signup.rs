//! SignupHandler - Creates an account with a bcrypt-hashed password.

use std::sync::Arc;

use super::{required_password, required_username, store_error};
use crate::domain::foundation::{AuthError, Username};
use crate::ports::{Credential, CredentialStore, PasswordHasher};

#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub username: String,
    pub password: String,
}

pub struct SignupHandler {
    credentials: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl SignupHandler {
    pub fn new(credentials: Arc<dyn CredentialStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            credentials,
            hasher,
        }
    }

    /// # Errors
    ///
    /// - `MissingField` if username or password is blank
    /// - `UsernameTaken` if the account already exists
    pub async fn handle(&self, cmd: SignupCommand) -> Result<Username, AuthError> {
        let username = required_username(&cmd.username)?;
        required_password(&cmd.password)?;

        if self.credentials.find(&username).await.map_err(store_error)?.is_some() {
            tracing::warn!(user = %username, "Signup with existing username");
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = cmd.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::service_unavailable(format!("hashing task failed: {}", e)))??;

        self.credentials
            .insert(&Credential::new(username.clone(), password_hash))
            .await
            .map_err(store_error)?;

        tracing::info!(user = %username, "Account created");
        Ok(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::BcryptPasswordHasher;
    use crate::adapters::memory::InMemoryCredentialStore;

    fn handler(store: &InMemoryCredentialStore) -> SignupHandler {
        SignupHandler::new(Arc::new(store.clone()), Arc::new(BcryptPasswordHasher::new(4)))
    }

    fn command(username: &str, password: &str) -> SignupCommand {
        SignupCommand {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn stores_hash_not_password() {
        let store = InMemoryCredentialStore::new();

        let username = handler(&store).handle(command("alice", "s3cret")).await.unwrap();

        let credential = store.find(&username).await.unwrap().unwrap();
        assert_ne!(credential.password_hash, "s3cret");
        assert!(BcryptPasswordHasher::new(4)
            .verify("s3cret", &credential.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = InMemoryCredentialStore::new();
        handler(&store).handle(command("alice", "one")).await.unwrap();

        let err = handler(&store).handle(command("alice", "two")).await.unwrap_err();

        assert_eq!(err, AuthError::UsernameTaken("alice".to_string()));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let store = InMemoryCredentialStore::new();

        assert_eq!(
            handler(&store).handle(command("  ", "pw")).await.unwrap_err(),
            AuthError::MissingField("username")
        );
        assert_eq!(
            handler(&store).handle(command("alice", "")).await.unwrap_err(),
            AuthError::MissingField("password")
        );
        assert!(store.is_empty().await);
    }
}
