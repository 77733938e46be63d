use deadpool_postgres::PoolError;
use serde_json::Value;
use tokio_postgres::Error as PgError;
use tracing::{instrument, warn};

use crate::db::PgPool;

#[derive(Debug, thiserror::Error)]
enum ActivityStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// Best-effort audit trail. A failed write is logged and swallowed so the
/// operation that triggered it still succeeds.
#[instrument(skip(pool, detail))]
pub async fn log_activity(pool: &PgPool, user_id: i64, action: &str, detail: Option<&Value>) {
    if let Err(err) = insert_activity(pool, user_id, action, detail).await {
        warn!(user_id, action, error = %err, "failed to record activity entry");
    }
}

async fn insert_activity(
    pool: &PgPool,
    user_id: i64,
    action: &str,
    detail: Option<&Value>,
) -> Result<(), ActivityStorageError> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            "INSERT INTO tm.activity_log (user_id, action, detail) VALUES ($1, $2, $3)",
        )
        .await?;
    client.execute(&stmt, &[&user_id, &action, &detail]).await?;
    Ok(())
}
