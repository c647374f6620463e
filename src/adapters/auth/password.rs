//! bcrypt password hashing.

use crate::domain::foundation::AuthError;
use crate::ports::PasswordHasher;

/// Hashes passwords with bcrypt at a configurable cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            AuthError::service_unavailable("password hashing failed")
        })
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, hash).map_err(|e| {
            tracing::error!("Stored password hash is unreadable: {}", e);
            AuthError::service_unavailable("password verification failed")
        })
    }
}
