//! Route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::Serialize;
use serde_json::Value;

use super::{
    AppState,
    error::{ApiError, ApiResult},
    validation::AuthenticateRequest,
};
use crate::{
    constants::USERS,
    store::{InsertOneResult, StoreError},
    user::{AuthenticatedUser, UserDetails, UserProfile},
};

/// Handler for GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    Ok(Json(state.users.find_all().await?))
}

/// Handler for GET /api/users/{id}
///
/// The path segment is the user's email address.
pub async fn read_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserDetails>> {
    match state.users.find_by_email(&id).await? {
        Some(resolved) => Ok(Json(resolved.into_details())),
        None => Err(ApiError::user_not_found(&id)),
    }
}

/// Handler for POST /api/authenticate
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> ApiResult<Json<AuthenticatedUser>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let credentials = request.validate()?;

    let user = state
        .auth
        .authenticate(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(user))
}

/// Handler for POST /api/users
///
/// Stores the body unchecked. Use the CLI to create users with hashed passwords.
pub async fn insert_user(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<InsertOneResult>> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Value::Object(document) = body else {
        return Err(crate::Error::from(StoreError::NotAnObject {
            collection: USERS.to_string(),
        })
        .into());
    };

    Ok(Json(state.users.insert_raw(document).await?))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    backend: &'static str,
}

/// Handler for GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        backend: state.users.store().kind(),
    })
}
