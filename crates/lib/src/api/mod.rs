//! HTTP API for Roster
//!
//! Exposes the user directory over JSON:
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /api/users` | all users, without permissions |
//! | `GET /api/users/{id}` | one user by email, with permissions |
//! | `POST /api/authenticate` | verify `{email, password}` |
//! | `POST /api/users` | insert a raw user document |
//! | `GET /health` | liveness and backend kind |
//!
//! Responses never carry password hashes.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    store::DocumentStore,
    user::{AuthenticationService, UserRepository},
};

pub mod error;
pub mod handlers;
pub mod validation;

pub use error::{ApiError, ApiResult, ErrorResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub auth: AuthenticationService,
}

impl AppState {
    /// Builds the repository and authentication service over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let users = UserRepository::new(store);
        let auth = AuthenticationService::new(users.clone());
        Self { users, auth }
    }
}

/// Builds the router with every Roster route mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::insert_user),
        )
        .route("/api/users/{id}", get(handlers::read_user))
        .route("/api/authenticate", post(handlers::authenticate))
        .with_state(state)
}
