//! HTTP handlers for account endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::handle_auth_error;
use crate::application::{LoginCommand, LoginHandler, SignupCommand, SignupHandler};

use super::dto::{CredentialsRequest, LoginResponse, SignupResponse};

#[derive(Clone)]
pub struct AccountHandlers {
    signup_handler: Arc<SignupHandler>,
    login_handler: Arc<LoginHandler>,
}

impl AccountHandlers {
    pub fn new(signup_handler: Arc<SignupHandler>, login_handler: Arc<LoginHandler>) -> Self {
        Self {
            signup_handler,
            login_handler,
        }
    }
}

/// POST /api/auth/signup - Create an account
pub async fn signup(
    State(handlers): State<AccountHandlers>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    let cmd = SignupCommand {
        username: req.username,
        password: req.password,
    };

    match handlers.signup_handler.handle(cmd).await {
        Ok(username) => {
            let response = SignupResponse {
                username: username.to_string(),
                message: "Account created successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_auth_error(e),
    }
}

/// POST /api/auth/login - Exchange credentials for a bearer token
pub async fn login(
    State(handlers): State<AccountHandlers>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    let cmd = LoginCommand {
        username: req.username,
        password: req.password,
    };

    match handlers.login_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(LoginResponse::from(result))).into_response(),
        Err(e) => handle_auth_error(e),
    }
}
