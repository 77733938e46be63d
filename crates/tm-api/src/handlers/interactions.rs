use axum::{extract::State, Json};

use tm_common::api::interaction::{RecordInteractionRequest, RecordInteractionResponse};
use tm_common::engine;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

pub async fn record_interaction(
    State(state): State<SharedState>,
    _auth: AuthUser,
    Json(payload): Json<RecordInteractionRequest>,
) -> Result<Json<RecordInteractionResponse>, ApiError> {
    let response = engine::record_interaction(&state.pool, &payload).await?;
    Ok(Json(response))
}
