//! LoginHandler - Verifies a password and issues a session token.

use std::sync::Arc;

use super::{required_password, required_username, store_error};
use crate::domain::foundation::{AuthError, Timestamp, Username};
use crate::ports::{CredentialStore, PasswordHasher, TokenIssuer};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub username: Username,
    pub token: String,
    pub expires_at: Timestamp,
}

pub struct LoginHandler {
    credentials: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            credentials,
            hasher,
            tokens,
        }
    }

    /// Unknown user and wrong password both fail with `InvalidCredentials`.
    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthError> {
        let username = required_username(&cmd.username)?;
        required_password(&cmd.password)?;

        let Some(credential) = self.credentials.find(&username).await.map_err(store_error)? else {
            tracing::warn!(user = %username, "Login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.hasher);
        let password = cmd.password;
        let hash = credential.password_hash;
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::service_unavailable(format!("verification task failed: {}", e)))??;

        if !verified {
            tracing::warn!(user = %username, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&username)?;
        tracing::info!(user = %username, "User logged in");

        Ok(LoginResult {
            username,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}
