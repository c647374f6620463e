//! Password hashing port.

use crate::domain::foundation::AuthError;

/// One-way password hashing.
///
/// Implementations are CPU-bound and synchronous; callers on the async
/// runtime should run them on a blocking thread.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if hashing fails
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}
