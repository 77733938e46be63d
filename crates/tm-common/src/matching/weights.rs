use super::scoring::ScoreBreakdown;

/// Default aggregation weights. Hand-tuned constants, not learned:
/// preference-fit carries the most weight because it reflects explicit user
/// intent; affinity stays small until interaction data accumulates.
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    feature_similarity: 0.20,
    complementary: 0.20,
    skill_balance: 0.15,
    availability: 0.15,
    preference_fit: 0.25,
    interaction_affinity: 0.05,
};

/// Named weight table handed to the aggregator, one entry per sub-score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub feature_similarity: f64,
    pub complementary: f64,
    pub skill_balance: f64,
    pub availability: f64,
    pub preference_fit: f64,
    pub interaction_affinity: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.feature_similarity
            + self.complementary
            + self.skill_balance
            + self.availability
            + self.preference_fit
            + self.interaction_affinity
    }

    /// Weighted aggregate of a breakdown, still in [0, 1].
    pub fn combine(&self, breakdown: &ScoreBreakdown) -> f64 {
        breakdown.feature_similarity * self.feature_similarity
            + breakdown.complementary * self.complementary
            + breakdown.skill_balance * self.skill_balance
            + breakdown.availability * self.availability
            + breakdown.preference_fit * self.preference_fit
            + breakdown.interaction_affinity * self.interaction_affinity
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}
