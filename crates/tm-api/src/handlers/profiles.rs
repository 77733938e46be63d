use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use tm_common::api::profile::{UpsertProfileRequest, UpsertProfileResponse};
use tm_common::db;
use tm_common::sports::Sport;
use tm_common::SportProfile;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

pub async fn upsert_profile(
    State(state): State<SharedState>,
    _auth: AuthUser,
    Json(payload): Json<UpsertProfileRequest>,
) -> Result<Json<UpsertProfileResponse>, ApiError> {
    let response = db::upsert_profile(&state.pool, &payload.profile).await?;

    db::log_activity(
        &state.pool,
        payload.profile.user_id,
        "upsert_profile",
        Some(&json!({
            "sport": payload.profile.sport.as_ref(),
            "status": response.status.as_ref(),
        })),
    )
    .await;

    Ok(Json(response))
}

pub async fn get_profile(
    State(state): State<SharedState>,
    Path((user_id, sport)): Path<(i64, Sport)>,
    _auth: AuthUser,
) -> Result<Json<SportProfile>, ApiError> {
    let profile = db::fetch_profile(&state.pool, user_id, sport)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no {sport} profile for user {user_id}")))?;

    Ok(Json(profile))
}
