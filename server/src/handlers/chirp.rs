use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{AuthenticatedUser, JsonBody};
use crate::models::{Chirp, CreateChirpRequest};
use crate::store::ChirpStore;

pub async fn create_chirp(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(chirps): State<Arc<dyn ChirpStore>>,
    JsonBody(payload): JsonBody<CreateChirpRequest>,
) -> Result<(StatusCode, Json<Chirp>), ApiError> {
    let chirp = chirps.create_chirp(user_id, &payload.body).await?;
    info!(chirp_id = %chirp.id, user_id = %user_id, "chirp created");

    Ok((StatusCode::CREATED, Json(chirp)))
}

pub async fn list_chirps(
    State(chirps): State<Arc<dyn ChirpStore>>,
) -> Result<Json<Vec<Chirp>>, ApiError> {
    Ok(Json(chirps.list_chirps().await?))
}

pub async fn get_chirp(
    State(chirps): State<Arc<dyn ChirpStore>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Chirp>, ApiError> {
    chirps
        .find_chirp(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Chirp"))
}

/// Only the author may delete a chirp
pub async fn delete_chirp(
    AuthenticatedUser(user_id): AuthenticatedUser,
    State(chirps): State<Arc<dyn ChirpStore>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let chirp = chirps
        .find_chirp(id)
        .await?
        .ok_or(ApiError::NotFound("Chirp"))?;

    if chirp.user_id != user_id {
        warn!(chirp_id = %id, user_id = %user_id, "refusing to delete another user's chirp");
        return Err(ApiError::Forbidden);
    }

    if !chirps.delete_chirp(id).await? {
        return Err(ApiError::NotFound("Chirp"));
    }

    Ok(StatusCode::NO_CONTENT)
}
