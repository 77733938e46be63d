pub mod api;
pub mod db;
pub mod engine;
pub mod logging;
pub mod matching;
pub mod sports;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sports::{PreferredTime, SkillKind, Sport, SportTraits, TraitPreference};

/// Fixed integer scale for every tracked skill rating.
pub const SKILL_MIN: u8 = 1;
pub const SKILL_MAX: u8 = 10;

/// Geographic point as stored: (longitude, latitude) in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub point: GeoPoint,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default)]
    pub weekdays: bool,
    #[serde(default)]
    pub weekends: bool,
    pub preferred_time: PreferredTime,
}

/// Inclusive skill-rating range used by partner preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRange {
    pub min: u8,
    pub max: u8,
}

impl SkillRange {
    pub fn full() -> Self {
        Self {
            min: SKILL_MIN,
            max: SKILL_MAX,
        }
    }

    pub fn contains(&self, rating: u8) -> bool {
        (self.min..=self.max).contains(&rating)
    }

    /// A range spanning the whole scale expresses no constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.min <= SKILL_MIN && self.max >= SKILL_MAX
    }
}

/// A categorical preference set. `Any` is the wildcard sentinel meaning
/// "no constraint on this dimension".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitFilter<T> {
    Any,
    OneOf(Vec<T>),
}

impl<T: PartialEq> TraitFilter<T> {
    pub fn allows(&self, value: &T) -> bool {
        match self {
            TraitFilter::Any => true,
            TraitFilter::OneOf(values) => values.contains(value),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, TraitFilter::Any)
    }
}

impl<T> Default for TraitFilter<T> {
    fn default() -> Self {
        TraitFilter::Any
    }
}

/// Availability constraints inside a partner preference. A `true` flag means
/// the partner must offer that slot; the time filter may be wildcarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPreference {
    #[serde(default)]
    pub weekdays: bool,
    #[serde(default)]
    pub weekends: bool,
    #[serde(default)]
    pub preferred_times: TraitFilter<PreferredTime>,
}

impl Default for AvailabilityPreference {
    fn default() -> Self {
        Self {
            weekdays: false,
            weekends: false,
            preferred_times: TraitFilter::Any,
        }
    }
}

/// Explicit partner constraints attached to a profile, or supplied ad hoc
/// with a preference search. Every field accepts-everything by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerPreference {
    #[serde(default)]
    pub skill_ranges: BTreeMap<SkillKind, SkillRange>,
    pub traits: TraitPreference,
    #[serde(default)]
    pub availability: AvailabilityPreference,
    /// Reward complementary role pairings instead of treating them neutrally.
    #[serde(default)]
    pub complementary_skills: bool,
    /// Maximum search radius in kilometers.
    #[serde(default)]
    pub max_distance_km: Option<f64>,
}

impl PartnerPreference {
    /// Effective range for one tracked skill; absent entries mean the full scale.
    pub fn skill_range(&self, kind: SkillKind) -> SkillRange {
        self.skill_ranges
            .get(&kind)
            .copied()
            .unwrap_or_else(SkillRange::full)
    }
}

/// One per (user, sport). Owned exclusively by its user; the engine only
/// ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    pub sport: Sport,
    /// Ratings keyed by skill kind, each within [SKILL_MIN, SKILL_MAX].
    pub skills: BTreeMap<SkillKind, u8>,
    pub traits: SportTraits,
    pub location: Location,
    pub availability: Availability,
    #[serde(default)]
    pub preference: Option<PartnerPreference>,
}

impl SportProfile {
    pub fn skill(&self, kind: SkillKind) -> Option<u8> {
        self.skills.get(&kind).copied()
    }

    /// Mean rating across the sport's tracked skills. Missing ratings count
    /// as zero so malformed rows sort low instead of panicking; vectorization
    /// rejects them properly.
    pub fn mean_skill(&self) -> f64 {
        let kinds = self.sport.skill_kinds();
        if kinds.is_empty() {
            return 0.0;
        }
        let sum: u32 = kinds
            .iter()
            .map(|kind| u32::from(self.skill(*kind).unwrap_or(0)))
            .sum();
        f64::from(sum) / kinds.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_range_full_scale_is_unconstrained() {
        assert!(SkillRange::full().is_unconstrained());
        assert!(!SkillRange { min: 2, max: 10 }.is_unconstrained());
        assert!(SkillRange { min: 1, max: 10 }.contains(10));
        assert!(!SkillRange { min: 3, max: 7 }.contains(8));
    }

    #[test]
    fn trait_filter_wildcard_allows_everything() {
        let any: TraitFilter<u8> = TraitFilter::Any;
        assert!(any.allows(&42));

        let some = TraitFilter::OneOf(vec![1, 2]);
        assert!(some.allows(&1));
        assert!(!some.allows(&3));
    }

    #[test]
    fn geo_point_validates_coordinate_bounds() {
        assert!(GeoPoint { lon: 77.2, lat: 28.6 }.is_valid());
        assert!(!GeoPoint { lon: 181.0, lat: 0.0 }.is_valid());
        assert!(!GeoPoint { lon: 0.0, lat: -90.5 }.is_valid());
    }
}
