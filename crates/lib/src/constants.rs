//! Constants shared across the library.

/// Collection holding user documents.
pub const USERS: &str = "users";

/// Collection holding role documents.
pub const ROLES: &str = "roles";

/// Collection holding permission documents.
pub const PERMISSIONS: &str = "permissions";

/// Message returned for every failed authentication, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Your email address or password are invalid.";
