use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::SportProfile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Created,
    Updated,
}

/// One profile per (user, sport); posting again replaces the stored row.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProfileRequest {
    #[serde(flatten)]
    pub profile: SportProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertProfileResponse {
    pub id: i64,
    pub user_id: i64,
    pub status: ProfileStatus,
}
