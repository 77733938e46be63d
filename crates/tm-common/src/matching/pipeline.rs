use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{PartnerPreference, SportProfile};

use super::{
    affinity::AffinityConfig,
    filter::check_partner_constraints,
    scoring::{
        availability_score, complementary_score, preference_fit_score, skill_balance_score,
        ScoreBreakdown,
    },
    vectorizer::{feature_similarity, vectorize, ProfileIntegrityError},
    weights::ScoreWeights,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingConfig {
    pub weights: ScoreWeights,
    pub affinity: AffinityConfig,
}

impl MatchingConfig {
    pub fn from_env() -> Self {
        Self {
            weights: ScoreWeights::default(),
            affinity: AffinityConfig::from_env(),
        }
    }
}

/// One ranked candidate: the profile, the 0-100 aggregate and the full
/// sub-score breakdown. The breakdown is part of the caller contract, never
/// an optional extra.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPartner {
    pub profile: SportProfile,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Filter, score and rank retrieved candidates for one requester.
    ///
    /// The requester's own profile must vectorize; a malformed requester row
    /// fails the request. A malformed *candidate* row is logged and skipped
    /// so one bad record never sinks the whole result set. Output is sorted
    /// by score descending with a stable tie-break on candidate identity.
    pub fn rank_partners(
        &self,
        requester: &SportProfile,
        preference: Option<&PartnerPreference>,
        candidates: &[SportProfile],
        affinities: &HashMap<i64, f64>,
    ) -> Result<Vec<RankedPartner>, ProfileIntegrityError> {
        let requester_vector = vectorize(requester)?;

        let mut ranked: Vec<RankedPartner> = candidates
            .iter()
            .filter(|candidate| candidate.user_id != requester.user_id)
            .filter_map(|candidate| {
                self.evaluate_candidate(requester, &requester_vector, preference, candidate, affinities)
            })
            .collect();

        ranked.sort_by(|a, b| match b.score.cmp(&a.score) {
            Ordering::Equal => a.profile.user_id.cmp(&b.profile.user_id),
            other => other,
        });

        Ok(ranked)
    }

    fn evaluate_candidate(
        &self,
        requester: &SportProfile,
        requester_vector: &[f64],
        preference: Option<&PartnerPreference>,
        candidate: &SportProfile,
        affinities: &HashMap<i64, f64>,
    ) -> Option<RankedPartner> {
        let filter = match check_partner_constraints(preference, candidate) {
            Ok(filter) => filter,
            Err(err) => {
                warn!(
                    candidate_user = candidate.user_id,
                    error = %err,
                    "skipping candidate with integrity anomaly"
                );
                return None;
            }
        };
        if !filter.accepted {
            debug!(
                candidate_user = candidate.user_id,
                reasons = ?filter.reject_reasons(),
                "candidate rejected by hard constraints"
            );
            return None;
        }

        let breakdown = match self.score_candidate(requester, requester_vector, preference, candidate, affinities)
        {
            Ok(breakdown) => breakdown,
            Err(err) => {
                warn!(
                    candidate_user = candidate.user_id,
                    error = %err,
                    "skipping candidate with integrity anomaly"
                );
                return None;
            }
        };

        let total = self.config.weights.combine(&breakdown);
        let score = (total * 100.0).round().clamp(0.0, 100.0) as u8;

        Some(RankedPartner {
            profile: candidate.clone(),
            score,
            breakdown,
        })
    }

    fn score_candidate(
        &self,
        requester: &SportProfile,
        requester_vector: &[f64],
        preference: Option<&PartnerPreference>,
        candidate: &SportProfile,
        affinities: &HashMap<i64, f64>,
    ) -> Result<ScoreBreakdown, ProfileIntegrityError> {
        let candidate_vector = vectorize(candidate)?;

        Ok(ScoreBreakdown {
            feature_similarity: feature_similarity(requester_vector, &candidate_vector),
            complementary: complementary_score(preference, requester, candidate)?,
            skill_balance: skill_balance_score(requester, candidate),
            availability: availability_score(requester, candidate),
            preference_fit: preference_fit_score(preference, candidate)?,
            interaction_affinity: affinities
                .get(&candidate.user_id)
                .copied()
                .unwrap_or(0.0),
        })
    }
}
