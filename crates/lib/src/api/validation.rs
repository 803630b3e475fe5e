//! Request payload validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::error::ApiError;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$").unwrap()
});

/// Whether `email` is a syntactically valid address with a top-level domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Body of `POST /api/authenticate`.
///
/// Fields are optional here so that a missing field is reported as a
/// validation failure rather than a deserialization failure. Unknown keys are
/// rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthenticateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Credentials that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl AuthenticateRequest {
    /// Checks that both fields are present and non-empty and that the email is well formed.
    pub fn validate(self) -> Result<Credentials, ApiError> {
        let email = match self.email {
            Some(email) if !email.is_empty() => email,
            _ => return Err(ApiError::BadRequest("\"email\" is required".to_string())),
        };
        if !is_valid_email(&email) {
            return Err(ApiError::BadRequest(
                "\"email\" must be a valid email".to_string(),
            ));
        }
        let password = match self.password {
            Some(password) if !password.is_empty() => password,
            _ => return Err(ApiError::BadRequest("\"password\" is required".to_string())),
        };
        Ok(Credentials { email, password })
    }
}
