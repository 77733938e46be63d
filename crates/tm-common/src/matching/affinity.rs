use std::collections::HashMap;

use crate::api::interaction::InteractionKind;

/// Tunables for the interaction-affinity reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffinityConfig {
    /// Scale applied to interactions the candidate initiated toward the
    /// requester; self-initiated engagement is the stronger signal.
    pub received_scale: f64,
    /// Weighted sums divide by this before clamping to 1.0, so one highly
    /// engaged pair cannot dominate the aggregate score.
    pub saturation: f64,
}

impl Default for AffinityConfig {
    fn default() -> Self {
        Self {
            received_scale: 0.7,
            saturation: 100.0,
        }
    }
}

impl AffinityConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            received_scale: env_f64("TM_AFFINITY_RECEIVED_SCALE", defaults.received_scale),
            saturation: env_f64("TM_AFFINITY_SATURATION", defaults.saturation),
        }
    }
}

fn env_f64(var: &str, default: f64) -> f64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// One stored interaction record reduced to what affinity needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PairInteraction {
    pub initiator_id: i64,
    pub target_id: i64,
    pub kind: InteractionKind,
    pub rating: Option<i16>,
    pub count: i32,
}

/// Fixed engagement weight per interaction kind. Ratings feed through the
/// rated kind as rating x 2 (neutral 5 when the record carries none).
fn kind_weight(kind: InteractionKind, rating: Option<i16>) -> f64 {
    match kind {
        InteractionKind::ViewProfile => 1.0,
        InteractionKind::SendFriendRequest => 3.0,
        InteractionKind::SendMessage => 5.0,
        InteractionKind::AcceptFriendRequest => 8.0,
        InteractionKind::PlayTogether => 10.0,
        InteractionKind::RateMatch => rating.map_or(5.0, |r| f64::from(r) * 2.0),
    }
}

/// Reduce both directions of a requester's interaction history into one
/// bounded [0, 1] affinity per counterpart. Pairs with no history simply
/// have no entry, which downstream treats as exactly zero.
pub fn build_affinity_map(
    requester_id: i64,
    records: &[PairInteraction],
    config: &AffinityConfig,
) -> HashMap<i64, f64> {
    let mut sums: HashMap<i64, f64> = HashMap::new();

    for record in records {
        let initiated = record.initiator_id == requester_id;
        let other = if initiated {
            record.target_id
        } else if record.target_id == requester_id {
            record.initiator_id
        } else {
            continue;
        };

        let mut weight = kind_weight(record.kind, record.rating);
        if !initiated {
            weight = (weight * config.received_scale).round();
        }

        *sums.entry(other).or_default() += weight * f64::from(record.count.max(1));
    }

    sums.into_iter()
        .map(|(other, sum)| (other, (sum / config.saturation).min(1.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        initiator_id: i64,
        target_id: i64,
        kind: InteractionKind,
        count: i32,
    ) -> PairInteraction {
        PairInteraction {
            initiator_id,
            target_id,
            kind,
            rating: None,
            count,
        }
    }

    #[test]
    fn no_history_yields_empty_map() {
        let map = build_affinity_map(1, &[], &AffinityConfig::default());
        assert!(map.is_empty());
    }

    #[test]
    fn stronger_kinds_outrank_weaker_ones() {
        let config = AffinityConfig::default();
        let records = vec![
            record(1, 2, InteractionKind::PlayTogether, 1),
            record(1, 3, InteractionKind::ViewProfile, 1),
        ];

        let map = build_affinity_map(1, &records, &config);
        assert!(map[&2] > map[&3]);
    }

    #[test]
    fn received_interactions_count_at_a_reduced_fraction() {
        let config = AffinityConfig::default();
        let sent = build_affinity_map(1, &[record(1, 2, InteractionKind::SendMessage, 2)], &config);
        let received =
            build_affinity_map(1, &[record(2, 1, InteractionKind::SendMessage, 2)], &config);

        assert!(received[&2] < sent[&2]);
        // 5 * 0.7 rounds to 4, times count 2, over saturation 100.
        assert!((received[&2] - 0.08).abs() < 1e-9);
    }

    #[test]
    fn rating_drives_the_rated_kind_weight() {
        let config = AffinityConfig::default();
        let mut rated = record(1, 2, InteractionKind::RateMatch, 1);
        rated.rating = Some(5);

        let map = build_affinity_map(1, &[rated], &config);
        assert!((map[&2] - 0.10).abs() < 1e-9);
    }

    #[test]
    fn heavy_engagement_saturates_at_one() {
        let config = AffinityConfig::default();
        let records = vec![record(1, 2, InteractionKind::PlayTogether, 50)];

        let map = build_affinity_map(1, &records, &config);
        assert_eq!(map[&2], 1.0);
    }

    #[test]
    fn unrelated_records_are_ignored() {
        let config = AffinityConfig::default();
        let records = vec![record(7, 8, InteractionKind::PlayTogether, 1)];

        let map = build_affinity_map(1, &records, &config);
        assert!(map.is_empty());
    }
}
