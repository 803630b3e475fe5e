//! Email and password authentication
//!
//! Authentication never reveals which part of the credentials was wrong: an
//! unknown email and a wrong password produce the same error.

use std::sync::Arc;

use super::{
    UserRepository,
    crypto::{Argon2Verifier, CredentialVerifier},
    errors::UserError,
    types::AuthenticatedUser,
};
use crate::Result;

/// Verifies credentials against the user repository.
#[derive(Clone)]
pub struct AuthenticationService {
    users: UserRepository,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthenticationService {
    /// Creates a service verifying Argon2id password hashes.
    pub fn new(users: UserRepository) -> Self {
        Self::with_verifier(users, Arc::new(Argon2Verifier))
    }

    pub fn with_verifier(users: UserRepository, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { users, verifier }
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Authenticates a user by email and password.
    ///
    /// The user's permissions are resolved before the password is checked, so
    /// a user with a dangling role fails with `UserError::RoleNotFound` even
    /// when the password is wrong.
    ///
    /// # Errors
    /// `UserError::InvalidCredentials` when the email is unknown, the user has
    /// no stored password, or the password does not match.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let Some(resolved) = self.users.find_by_email(email).await? else {
            tracing::debug!(email, "Authentication failed: unknown email");
            return Err(UserError::InvalidCredentials.into());
        };

        let Some(password_hash) = resolved.user.password_hash.as_deref() else {
            tracing::debug!(email, "Authentication failed: user has no password");
            return Err(UserError::InvalidCredentials.into());
        };

        if !self.verifier.verify(password, password_hash) {
            tracing::debug!(email, "Authentication failed: password mismatch");
            return Err(UserError::InvalidCredentials.into());
        }

        tracing::info!(email, user_id = %resolved.user.id, "User authenticated");
        Ok(resolved.into())
    }
}
