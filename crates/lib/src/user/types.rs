//! Core data types for the user system

use serde::{Deserialize, Serialize};

use crate::{
    constants::USERS,
    store::{Document, from_document},
};

/// Field holding a user's password hash.
pub const PASSWORD_FIELD: &str = "password";

/// Field holding resolved permissions in outgoing user representations.
const PERMISSIONS_FIELD: &str = "permissions";

/// User record as stored in the `users` collection.
///
/// The email is the lookup key. Documents stored through the raw create path
/// may lack a password or a role reference, so both are optional here.
/// Fields other than the ones named here are kept in `attributes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    /// Email address (login identifier)
    pub email: String,

    /// Password hash (Argon2id, PHC string format)
    #[serde(rename = "password", default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Reference to the user's role
    #[serde(rename = "roleId", default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,

    #[serde(flatten)]
    pub attributes: Document,
}

impl User {
    /// Drops the credential hash, keeping everything else.
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: Some(self.email),
            role_id: self.role_id,
            attributes: self.attributes,
        }
    }

    /// Borrowing variant of `into_profile`.
    pub fn profile(&self) -> UserProfile {
        self.clone().into_profile()
    }
}

/// A user without any credential material.
///
/// This is the shape users take whenever they leave the library. Any stored
/// user document decodes into it once its `password` is removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "roleId", default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,

    #[serde(flatten)]
    pub attributes: Document,
}

impl UserProfile {
    /// Decodes a stored user document, discarding its password.
    ///
    /// Never rejects a stored document: an `email` or `roleId` that is not a
    /// string is kept verbatim among the attributes.
    pub fn from_document(mut document: Document) -> crate::Result<Self> {
        document.remove(PASSWORD_FIELD);

        let mut untyped = Document::new();
        for key in ["email", "roleId"] {
            if document.get(key).is_some_and(|v| !v.is_string())
                && let Some(value) = document.remove(key)
            {
                untyped.insert(key.to_string(), value);
            }
        }

        let mut profile: Self = from_document(USERS, document)?;
        profile.attributes.extend(untyped);
        Ok(profile)
    }

    /// Drops a stored `permissions` attribute so the resolved list replaces it.
    fn without_stored_permissions(mut self) -> Self {
        self.attributes.remove(PERMISSIONS_FIELD);
        self
    }
}

/// Role record stored in the `roles` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,

    /// Identifiers of the permissions this role grants
    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(flatten)]
    pub attributes: Document,
}

/// Permission record stored in the `permissions` collection.
///
/// Everything except the identifier is opaque to the user system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(flatten)]
    pub attributes: Document,
}

/// A loaded user together with the permissions granted by their role.
#[derive(Clone, Debug, PartialEq)]
pub struct UserWithPermissions {
    pub user: User,
    pub permissions: Vec<Permission>,
}

impl UserWithPermissions {
    /// Strips the credential hash for presentation.
    pub fn into_details(self) -> UserDetails {
        UserDetails {
            profile: self.user.into_profile().without_stored_permissions(),
            permissions: self.permissions,
        }
    }
}

/// Credential-free view of a user with resolved permissions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub permissions: Vec<Permission>,
}

/// Result of a successful authentication.
///
/// Built fresh for every call and never persisted. There is no credential
/// field to strip: the type cannot hold one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub permissions: Vec<Permission>,
}

impl From<UserWithPermissions> for AuthenticatedUser {
    fn from(resolved: UserWithPermissions) -> Self {
        AuthenticatedUser {
            profile: resolved.user.into_profile().without_stored_permissions(),
            permissions: resolved.permissions,
        }
    }
}

impl AuthenticatedUser {
    pub fn email(&self) -> &str {
        self.profile.email.as_deref().unwrap_or_default()
    }

    /// Whether the user holds the permission with the given identifier.
    pub fn has_permission(&self, permission_id: &str) -> bool {
        self.permissions.iter().any(|p| p.id == permission_id)
    }
}
