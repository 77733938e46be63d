use deadpool_postgres::PoolError;
use std::str::FromStr;
use tokio_postgres::Error as PgError;
use tracing::{instrument, warn};

use crate::api::interaction::{
    InteractionKind, InteractionStatus, RecordInteractionRequest, RecordInteractionResponse,
};
use crate::db::PgPool;
use crate::matching::PairInteraction;

#[derive(Debug, thiserror::Error)]
pub enum InteractionStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// One row per (initiator, target, kind). A repeat interaction increments the
/// counter in the same statement, so concurrent writers never race a
/// read-then-write cycle. A fresh rating replaces the stored one; other kinds
/// leave it untouched.
#[instrument(skip(pool, request), fields(initiator = request.initiator_id, target = request.target_id))]
pub async fn record_interaction(
    pool: &PgPool,
    request: &RecordInteractionRequest,
) -> Result<RecordInteractionResponse, InteractionStorageError> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            "INSERT INTO tm.user_interactions (\
                user_id, target_user_id, kind, rating\
            ) VALUES ($1, $2, $3, $4)\
            ON CONFLICT (user_id, target_user_id, kind) DO UPDATE\
            SET count = tm.user_interactions.count + 1,\
                rating = COALESCE(EXCLUDED.rating, tm.user_interactions.rating),\
                last_interacted_at = NOW()\
            RETURNING id, count, rating, last_interacted_at, xmax = 0 AS inserted",
        )
        .await?;

    let row = client
        .query_one(
            &stmt,
            &[
                &request.initiator_id,
                &request.target_id,
                &request.kind.as_ref(),
                &request.rating,
            ],
        )
        .await?;

    let inserted: bool = row.get("inserted");
    Ok(RecordInteractionResponse {
        id: row.get("id"),
        status: if inserted {
            InteractionStatus::Created
        } else {
            InteractionStatus::Updated
        },
        initiator_id: request.initiator_id,
        target_id: request.target_id,
        kind: request.kind,
        count: row.get("count"),
        rating: row.get("rating"),
        last_interacted_at: row.get("last_interacted_at"),
    })
}

/// Everything the affinity signal needs for one user, in both directions.
/// Rows with a kind this build no longer knows are logged and dropped.
#[instrument(skip(pool))]
pub async fn fetch_affinity_inputs(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<PairInteraction>, InteractionStorageError> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            "SELECT user_id, target_user_id, kind, rating, count \
             FROM tm.user_interactions \
             WHERE user_id = $1 OR target_user_id = $1",
        )
        .await?;

    let rows = client.query(&stmt, &[&user_id]).await?;

    let mut interactions = Vec::with_capacity(rows.len());
    for row in rows {
        let kind_name: String = row.get("kind");
        let kind = match InteractionKind::from_str(&kind_name) {
            Ok(kind) => kind,
            Err(_) => {
                warn!(kind = %kind_name, "skipping interaction row with unknown kind");
                continue;
            }
        };

        interactions.push(PairInteraction {
            initiator_id: row.get("user_id"),
            target_id: row.get("target_user_id"),
            kind,
            rating: row.get("rating"),
            count: row.get("count"),
        });
    }

    Ok(interactions)
}
