use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::auth::AuthService;
use crate::error::ApiError;

/// The user a request was authenticated as.
///
/// Taking this as a handler argument puts the route behind the auth gate:
/// requests without a valid session token are rejected with 401 before the
/// handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);
        let user_id = auth_service.authenticate(&parts.headers)?;
        Ok(Self(user_id))
    }
}
