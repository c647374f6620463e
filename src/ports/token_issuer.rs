//! Token issuer port - signs bearer tokens after a successful login.

use crate::domain::foundation::{AuthError, Timestamp, Username};

/// A signed bearer token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Issues access tokens that a [`SessionValidator`](super::SessionValidator)
/// will later accept.
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for the given user.
    fn issue(&self, username: &Username) -> Result<IssuedToken, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_issuer_is_object_safe() {
        fn _accepts_dyn(_issuer: &dyn TokenIssuer) {}
    }
}
