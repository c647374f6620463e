//! Session validation port for bearer token validation.
//!
//! HTTP middleware hands the raw token to this port and receives the
//! [`SessionContext`] the request will act under.
//!
//! # Example Implementation
//!
//! ```ignore
//! pub struct JwtSessionValidator { ... }
//!
//! #[async_trait]
//! impl SessionValidator for JwtSessionValidator {
//!     async fn validate(&self, token: &str) -> Result<SessionContext, AuthError> {
//!         // 1. Verify the signature
//!         // 2. Check iss and exp claims
//!         // 3. Map `sub` to a Username
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, SessionContext};

/// Validates access tokens and extracts the session context.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate issuer and expiry claims
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a bearer token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<SessionContext, AuthError>;
}
