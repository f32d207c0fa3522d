use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::MessageResponse;

/// Wipe every user, with their tokens and chirps. Development only.
pub async fn reset_users(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.is_dev() {
        warn!(platform = %state.platform, "admin reset refused outside dev");
        return Err(ApiError::Forbidden);
    }

    state.users.reset_users().await?;
    info!("all users reset");

    Ok(Json(MessageResponse {
        message: "Users reset".to_string(),
    }))
}
