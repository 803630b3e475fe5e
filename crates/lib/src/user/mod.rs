//! User system for Roster
//!
//! Provides the user repository, which loads users and resolves their
//! permissions through their role, and the authentication service built on it.
//!
//! Lookups run as a strict chain against the store: user, then role, then
//! permissions. A user whose role is missing or cannot be found is an
//! integrity violation, reported as `UserError::RoleMissing` or
//! `UserError::RoleNotFound` and distinct from the `None` returned when the
//! user itself is absent.

use std::sync::Arc;

use crate::{
    Result,
    constants::{PERMISSIONS, ROLES, USERS},
    store::{
        Document, DocumentStore, Filter, ID_FIELD, InsertOneResult, from_document, to_document,
    },
};

pub mod auth;
pub mod crypto;
pub mod errors;
pub mod types;

pub use auth::AuthenticationService;
pub use crypto::{Argon2Verifier, CredentialVerifier};
pub use errors::UserError;
pub use types::*;

/// Read access to users, roles and permissions, plus the raw create path.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying document store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Looks up a user by exact email match and resolves their permissions.
    ///
    /// Returns `Ok(None)` when no user has this email.
    ///
    /// # Errors
    /// `UserError::RoleMissing` if the user has no role reference, and
    /// `UserError::RoleNotFound` if it does not resolve.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPermissions>> {
        let Some(document) = self.store.find_one(USERS, &Filter::eq("email", email)).await? else {
            tracing::debug!(email, "No user with this email");
            return Ok(None);
        };

        let user: User = from_document(USERS, document)?;
        let permissions = self.resolve_permissions(&user).await?;

        Ok(Some(UserWithPermissions { user, permissions }))
    }

    /// Loads the permissions granted by `user`'s role.
    ///
    /// The result is unordered. Permission identifiers listed by the role that
    /// have no stored permission are silently absent from the result.
    pub async fn resolve_permissions(&self, user: &User) -> Result<Vec<Permission>> {
        let Some(role_id) = user.role_id.as_deref() else {
            tracing::error!(user_id = %user.id, "User has no role reference");
            return Err(UserError::RoleMissing {
                user_id: user.id.clone(),
            }
            .into());
        };

        let Some(document) = self.store.find_one(ROLES, &Filter::by_id(role_id)).await? else {
            tracing::error!(
                user_id = %user.id,
                role_id,
                "User references a role that does not exist"
            );
            return Err(UserError::RoleNotFound {
                role_id: role_id.to_string(),
            }
            .into());
        };

        let role: Role = from_document(ROLES, document)?;
        let documents = self
            .store
            .find(
                PERMISSIONS,
                &Filter::any_of(ID_FIELD, role.permissions.iter().cloned()),
            )
            .await?;

        documents
            .into_iter()
            .map(|document| from_document(PERMISSIONS, document))
            .collect()
    }

    /// Returns every stored user document, without resolving permissions.
    ///
    /// Nothing is filtered out: documents stored through the raw create path
    /// are listed as they are, minus any `password` field.
    pub async fn find_all(&self) -> Result<Vec<UserProfile>> {
        self.store
            .find_all(USERS)
            .await?
            .into_iter()
            .map(UserProfile::from_document)
            .collect()
    }

    /// Inserts `document` into the users collection as-is.
    pub async fn insert_raw(&self, document: Document) -> Result<InsertOneResult> {
        self.store.insert_one(USERS, document).await
    }

    /// Creates a well-formed user with an Argon2id password hash.
    ///
    /// Unlike `insert_raw`, this enforces email uniqueness. The role is not
    /// checked; a dangling reference surfaces on the user's next lookup.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role_id: &str,
    ) -> Result<InsertOneResult> {
        if self
            .store
            .find_one(USERS, &Filter::eq("email", email))
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists {
                email: email.to_string(),
            }
            .into());
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: Some(crypto::hash_password(password)?),
            role_id: Some(role_id.to_string()),
            attributes: Document::new(),
        };

        let ack = self.store.insert_one(USERS, to_document(&user)?).await?;
        tracing::info!(email, id = %ack.inserted_id, "Created user");
        Ok(ack)
    }

    /// Inserts a role granting the given permission identifiers.
    pub async fn create_role(
        &self,
        id: Option<&str>,
        permissions: &[String],
        attributes: Document,
    ) -> Result<InsertOneResult> {
        let mut document = attributes;
        if let Some(id) = id {
            document.insert(ID_FIELD.to_string(), id.into());
        }
        document.insert("permissions".to_string(), permissions.into());
        self.store.insert_one(ROLES, document).await
    }

    /// Inserts a permission with opaque descriptive attributes.
    pub async fn create_permission(
        &self,
        id: Option<&str>,
        attributes: Document,
    ) -> Result<InsertOneResult> {
        let mut document = attributes;
        if let Some(id) = id {
            document.insert(ID_FIELD.to_string(), id.into());
        }
        self.store.insert_one(PERMISSIONS, document).await
    }
}
