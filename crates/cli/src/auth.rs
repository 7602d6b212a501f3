//! Login, logout and the stored session

use licport_core::model::LoginRequest;
use licport_core::{token, Route, Session, ValidationError};

use crate::http::{ApiError, HttpClient};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Login succeeded but no access token was found in the response. Keys received: {keys}")]
    NoTokenFound { keys: String },

    #[error("Could not store the session: {0:#}")]
    Storage(anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::Api(e) => e.status(),
            _ => None,
        }
    }
}

fn validate(email: &str, password: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}

/// Exchanges credentials for a session and persists it.
pub fn login(http: &HttpClient, email: &str, password: &str) -> Result<Session, AuthError> {
    validate(email, password)?;

    let body = LoginRequest {
        email_id: email.trim(),
        password,
    };
    let resp = http.post("/auth/login", &body)?;

    let Some(resolved) = token::resolve(&resp.data) else {
        let keys = token::describe_keys(&resp.data);
        tracing::warn!(keys = %keys, "login response carried no token");
        return Err(AuthError::NoTokenFound { keys });
    };
    tracing::info!(source = %resolved.source, "access token resolved");

    http.session()
        .save(&resolved.session)
        .map_err(AuthError::Storage)?;
    http.navigator().set_current(Route::LoginSuccess);
    Ok(resolved.session)
}

/// Forgets every session key and sends the user to `/login`.
pub fn logout(http: &HttpClient) -> anyhow::Result<()> {
    http.session().clear()?;
    http.navigator().navigate(Route::Login);
    Ok(())
}

pub fn current_token(http: &HttpClient) -> Option<String> {
    http.session().current_token()
}
