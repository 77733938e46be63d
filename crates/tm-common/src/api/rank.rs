use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matching::{RankedPartner, ScoreBreakdown};
use crate::sports::{SkillKind, Sport, SportTraits};
use crate::{Availability, GeoPoint, PartnerPreference};

/// Ranking request from the HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    pub requester_id: i64,
    pub sport: Sport,
    /// Search from here instead of the stored profile location.
    #[serde(default)]
    pub origin_override: Option<GeoPoint>,
    #[serde(default)]
    pub max_distance_km: Option<f64>,
    /// Replaces the stored partner preference for this request only.
    #[serde(default)]
    pub preference_override: Option<PartnerPreference>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPartnerDto {
    pub user_id: i64,
    pub sport: Sport,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub skills: BTreeMap<SkillKind, u8>,
    pub traits: SportTraits,
    pub availability: Availability,
    pub address: String,
}

impl From<&RankedPartner> for RankedPartnerDto {
    fn from(ranked: &RankedPartner) -> Self {
        Self {
            user_id: ranked.profile.user_id,
            sport: ranked.profile.sport,
            score: ranked.score,
            breakdown: ranked.breakdown,
            skills: ranked.profile.skills.clone(),
            traits: ranked.profile.traits.clone(),
            availability: ranked.profile.availability,
            address: ranked.profile.location.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub requester_id: i64,
    pub sport: Sport,
    pub count: usize,
    pub partners: Vec<RankedPartnerDto>,
}

impl RankResponse {
    pub fn from_ranked(requester_id: i64, sport: Sport, ranked: &[RankedPartner]) -> Self {
        Self {
            requester_id,
            sport,
            count: ranked.len(),
            partners: ranked.iter().map(RankedPartnerDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_optionals_default_to_none() {
        let request: RankRequest =
            serde_json::from_str(r#"{"requester_id":7,"sport":"cricket"}"#).unwrap();
        assert_eq!(request.requester_id, 7);
        assert_eq!(request.sport, Sport::Cricket);
        assert!(request.origin_override.is_none());
        assert!(request.max_distance_km.is_none());
        assert!(request.preference_override.is_none());
        assert!(request.limit.is_none());
    }
}
