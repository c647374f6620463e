//! Authentication types for the domain layer.
//!
//! A `SessionContext` is resolved once per request from the bearer token and
//! handed explicitly to every handler that acts on behalf of a user. Nothing
//! about the signed-in user lives in process-wide state.

use super::Username;
use thiserror::Error;

/// The signed-in user a request acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Owner of every plan created or listed through this context.
    pub username: Username,
}

impl SessionContext {
    /// Creates a session context for the given user.
    pub fn new(username: Username) -> Self {
        Self { username }
    }
}

/// Authentication errors raised by signup, login and token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown user or wrong password; both map to this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signup with a username that already exists.
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    /// Signup or login with a blank field.
    #[error("Field '{0}' cannot be empty")]
    MissingField(&'static str),

    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The credential store or hasher failed.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_context_carries_username() {
        let ctx = SessionContext::new(Username::new("alice").unwrap());
        assert_eq!(ctx.username.as_str(), "alice");
    }

    #[test]
    fn token_errors_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::InvalidCredentials.requires_reauthentication());
        assert!(!AuthError::service_unavailable("db down").requires_reauthentication());
    }

    #[test]
    fn username_taken_mentions_name() {
        let err = AuthError::UsernameTaken("alice".to_string());
        assert!(err.to_string().contains("alice"));
    }
}
