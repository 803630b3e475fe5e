//! Password hashing for the user system
//!
//! Passwords are stored as Argon2id hashes in PHC string format, which embeds
//! the salt and parameters. Verification goes through the `CredentialVerifier`
//! trait so the authentication flow does not depend on a specific algorithm.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::UserError;
use crate::Result;

/// Hash a password using Argon2id
///
/// # Returns
/// The hash as a PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| UserError::PasswordHashingFailed {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash
///
/// A hash that cannot be parsed is treated as a mismatch.
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash.as_ref()) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .is_ok()
}

/// One-way check of a plaintext credential against a stored hash.
pub trait CredentialVerifier: Send + Sync {
    /// Returns `true` when `plaintext` matches `hash`.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// `CredentialVerifier` backed by Argon2id.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        verify_password(plaintext, hash)
    }
}
