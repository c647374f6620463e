//! HS256 session tokens.
//!
//! `JwtTokens` signs a token at login and validates it on every
//! authenticated request. The same secret and issuer are used both ways,
//! so one value implements both [`TokenIssuer`] and [`SessionValidator`].

use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, SessionContext, Timestamp, Username};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Token claims.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject - the username
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Signs and validates HS256 bearer tokens.
pub struct JwtTokens {
    secret: Secret<String>,
    issuer: String,
    ttl: Duration,
}

impl JwtTokens {
    pub fn new(secret: Secret<String>, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            ttl,
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key()).map_err(|e| {
            tracing::error!("Failed to sign session token: {}", e);
            AuthError::service_unavailable("could not sign token")
        })
    }
}

impl TokenIssuer for JwtTokens {
    fn issue(&self, username: &Username) -> Result<IssuedToken, AuthError> {
        let issued_at = Timestamp::now();
        let expires_at = Timestamp::from_datetime(*issued_at.as_datetime() + self.ttl);

        let token = self.sign(&SessionClaims {
            sub: username.as_str().to_string(),
            iss: self.issuer.clone(),
            iat: issued_at.unix_seconds(),
            exp: expires_at.unix_seconds(),
        })?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[async_trait]
impl SessionValidator for JwtTokens {
    async fn validate(&self, token: &str) -> Result<SessionContext, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding_key(), &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let username = Username::new(data.claims.sub).map_err(|_| {
            tracing::warn!("Token subject is not a valid username");
            AuthError::InvalidToken
        })?;

        Ok(SessionContext::new(username))
    }
}

impl std::fmt::Debug for JwtTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokens")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
