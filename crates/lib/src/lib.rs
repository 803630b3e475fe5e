//!
//! Roster: a user directory with role-based permissions and password authentication.
//! This library provides the storage, lookup and HTTP components of a Roster server.
//!
//! ## Core Concepts
//!
//! * **Documents (`store::Document`)**: JSON objects identified by a string `_id`, grouped into named collections.
//! * **Stores (`store::DocumentStore`)**: A pluggable storage layer for collections, with in-memory and SQL implementations.
//! * **Users, Roles and Permissions (`user::types`)**: A user references exactly one role, and a role lists the identifiers of the permissions it grants.
//! * **UserRepository (`user::UserRepository`)**: Loads users by email and resolves their permissions through their role.
//! * **AuthenticationService (`user::AuthenticationService`)**: Verifies an email and password pair and returns the user without credential material.
//! * **API (`api::router`)**: The HTTP routes exposing the directory.

pub mod api;
pub mod constants;
pub mod store;
pub mod user;

pub use store::{Document, DocumentStore, Filter, InsertOneResult};
pub use user::{AuthenticatedUser, AuthenticationService, UserRepository};

/// Result type used throughout the Roster library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Roster library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured storage errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured user errors from the user module
    #[error(transparent)]
    User(user::UserError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
            Error::User(_) => "user",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_invalid_credentials(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_conflict(),
            Error::User(user_err) => user_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error was caused by a document supplied by the caller.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_invalid_document(),
            _ => false,
        }
    }

    /// Check if this error indicates a data integrity issue.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_integrity_error(),
            Error::User(user_err) => user_err.is_integrity_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Store(store_err) => store_err.is_io_error(),
            _ => false,
        }
    }
}
