use axum::{extract::State, Json};

use tm_common::api::rank::{RankRequest, RankResponse};
use tm_common::engine::{self, RankOptions};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

const DEFAULT_RANK_LIMIT: usize = 50;
const MAX_RANK_LIMIT: usize = 200;

pub async fn rank_partners(
    State(state): State<SharedState>,
    _auth: AuthUser,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, ApiError> {
    let mut options = RankOptions::from(&request);
    options.limit = Some(
        request
            .limit
            .unwrap_or(DEFAULT_RANK_LIMIT)
            .clamp(1, MAX_RANK_LIMIT),
    );

    let ranked = engine::rank_partners(
        &state.pool,
        request.requester_id,
        request.sport,
        options,
        &state.matching,
    )
    .await?;

    Ok(Json(RankResponse::from_ranked(
        request.requester_id,
        request.sport,
        &ranked,
    )))
}
