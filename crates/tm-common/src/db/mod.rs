pub mod activity;
pub mod interactions;
pub mod migrations;
pub mod pool;
pub mod profiles;

pub use activity::log_activity;
pub use interactions::{
    fetch_affinity_inputs, record_interaction, InteractionStorageError,
};
pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool_from_url, DbPoolError, PgPool};
pub use profiles::{
    fetch_profile, fetch_profiles_within_radius, upsert_profile, CandidatePrefilters,
    ProfileStorageError,
};
