//! Account handlers - signup and login.

mod login;
mod signup;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use signup::{SignupCommand, SignupHandler};

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, Username, ValidationError};

fn required_username(raw: &str) -> Result<Username, AuthError> {
    Username::new(raw).map_err(|e| match e {
        ValidationError::EmptyField { .. } => AuthError::MissingField("username"),
        ValidationError::InvalidFormat { .. } => AuthError::InvalidCredentials,
    })
}

fn required_password(raw: &str) -> Result<(), AuthError> {
    if raw.trim().is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    Ok(())
}

fn store_error(err: DomainError) -> AuthError {
    match err.code {
        ErrorCode::UsernameTaken => AuthError::UsernameTaken(
            err.details.get("username").cloned().unwrap_or_default(),
        ),
        _ => {
            tracing::error!(error = %err, "Credential store failure");
            AuthError::service_unavailable(err.message)
        }
    }
}
