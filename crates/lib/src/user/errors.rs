//! Error types for the user system
use thiserror::Error;

use crate::constants::INVALID_CREDENTIALS_MESSAGE;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UserError {
    /// The email is unknown or the password does not match.
    ///
    /// Both cases share this variant so callers cannot tell them apart.
    #[error("{msg}", msg = INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// A user references a role that does not exist.
    #[error("Role '{role_id}' not found")]
    RoleNotFound { role_id: String },

    /// A user document carries no role reference at all.
    #[error("User '{user_id}' has no role")]
    RoleMissing { user_id: String },

    #[error("Email already exists: {email}")]
    EmailAlreadyExists { email: String },

    #[error("Password hashing failed: {reason}")]
    PasswordHashingFailed { reason: String },
}

impl UserError {
    /// Check if this error is an authentication failure.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, UserError::InvalidCredentials)
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        matches!(self, UserError::EmailAlreadyExists { .. })
    }

    /// Check if this error indicates broken references between stored records.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            UserError::RoleNotFound { .. } | UserError::RoleMissing { .. }
        )
    }
}

impl From<UserError> for crate::Error {
    fn from(err: UserError) -> Self {
        crate::Error::User(err)
    }
}
