use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::AuthService;
use crate::error::ApiError;
use crate::middleware::{AuthenticatedUser, JsonBody};
use crate::models::{CredentialsRequest, UserResponse};

pub async fn create_user(
    State(auth_service): State<Arc<AuthService>>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    payload.check()?;

    let user = auth_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Replace the caller's email and password
pub async fn update_user(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(auth_service): State<Arc<AuthService>>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    payload.check()?;

    let user = auth_service
        .update_credentials(user_id, &payload.email, &payload.password)
        .await?;

    Ok(Json(user.into()))
}
