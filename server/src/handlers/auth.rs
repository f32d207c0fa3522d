//! Login and refresh token endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::auth::{extract_bearer, AuthError, AuthService};
use crate::error::ApiError;
use crate::middleware::JsonBody;
use crate::models::{CredentialsRequest, LoginResponse, TokenResponse};

pub async fn login(
    State(auth_service): State<Arc<AuthService>>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.check()?;

    let outcome = auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        user: outcome.user.into(),
        token: outcome.token,
        refresh_token: outcome.refresh_token,
    }))
}

/// Trade the refresh token in the `Authorization` header for a new session token
pub async fn refresh(
    State(auth_service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let refresh_token = extract_bearer(&headers).map_err(|_| AuthError::RefreshNotFound)?;
    let token = auth_service.refresh(&refresh_token).await?;

    Ok(Json(TokenResponse { token }))
}

pub async fn revoke(
    State(auth_service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = extract_bearer(&headers)?;
    auth_service.revoke(&refresh_token).await;

    Ok(StatusCode::NO_CONTENT)
}
