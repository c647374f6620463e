//! PostgreSQL implementation of CredentialStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Username};
use crate::ports::{Credential, CredentialStore};

const UNIQUE_VIOLATION: &str = "23505";

/// Accounts in the `users` table.
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find(&self, username: &Username) -> Result<Option<Credential>, DomainError> {
        let row = sqlx::query("SELECT username, password_hash FROM users WHERE username = $1")
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch user: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| DomainError::database(format!("Failed to get password_hash: {}", e)))?;

        Ok(Some(Credential::new(username.clone(), password_hash)))
    }

    async fn insert(&self, credential: &Credential) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
            .bind(credential.username.as_str())
            .bind(&credential.password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .and_then(|db| db.code())
                    .is_some_and(|code| code == UNIQUE_VIOLATION);
                if duplicate {
                    DomainError::new(
                        ErrorCode::UsernameTaken,
                        format!("Username already exists: {}", credential.username),
                    )
                    .with_detail("username", credential.username.as_str())
                } else {
                    DomainError::database(format!("Failed to insert user: {}", e))
                }
            })?;

        Ok(())
    }
}
