use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Interaction kinds tracked for the implicit-affinity signal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InteractionKind {
    ViewProfile,
    SendMessage,
    SendFriendRequest,
    AcceptFriendRequest,
    PlayTogether,
    RateMatch,
}

impl InteractionKind {
    /// Only match ratings carry a payload.
    pub fn accepts_rating(self) -> bool {
        matches!(self, InteractionKind::RateMatch)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStatus {
    Created,
    Updated,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordInteractionRequest {
    pub initiator_id: i64,
    pub target_id: i64,
    pub kind: InteractionKind,
    /// 1..=5, only meaningful for `rate_match`.
    #[serde(default)]
    pub rating: Option<i16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInteractionResponse {
    pub id: i64,
    pub status: InteractionStatus,
    pub initiator_id: i64,
    pub target_id: i64,
    pub kind: InteractionKind,
    pub count: i32,
    pub rating: Option<i16>,
    pub last_interacted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_round_trips_through_wire_names() {
        assert_eq!(InteractionKind::PlayTogether.as_ref(), "play_together");
        assert_eq!(
            InteractionKind::from_str("accept_friend_request").unwrap(),
            InteractionKind::AcceptFriendRequest
        );
    }

    #[test]
    fn only_rate_match_accepts_rating() {
        assert!(InteractionKind::RateMatch.accepts_rating());
        assert!(!InteractionKind::SendMessage.accepts_rating());
    }

    #[test]
    fn request_rating_defaults_to_none() {
        let request: RecordInteractionRequest = serde_json::from_str(
            r#"{"initiator_id":1,"target_id":2,"kind":"view_profile"}"#,
        )
        .unwrap();
        assert_eq!(request.kind, InteractionKind::ViewProfile);
        assert!(request.rating.is_none());
    }
}
