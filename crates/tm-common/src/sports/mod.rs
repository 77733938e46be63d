pub mod cricket;
pub mod football;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub use cricket::{
    BattingStyle, BowlingStyle, CricketPosition, CricketTraitPreference, CricketTraits,
};
pub use football::{
    FootballPosition, FootballTraitPreference, FootballTraits, PlayingStyle, PreferredFoot,
};

/// Sports the matching engine knows about. Each one carries its own closed
/// trait enumerations and a [`SportSpec`] strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sport {
    Cricket,
    Football,
}

impl Sport {
    /// Static strategy for this sport: vector layout, tracked skills and the
    /// complementary-pairing heuristic.
    pub fn spec(&self) -> &'static dyn SportSpec {
        match self {
            Sport::Cricket => &cricket::CricketSpec,
            Sport::Football => &football::FootballSpec,
        }
    }

    pub fn skill_kinds(&self) -> &'static [SkillKind] {
        self.spec().skill_kinds()
    }
}

/// Every tracked skill across all sports. A profile only carries the kinds
/// its sport tracks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkillKind {
    Batting,
    Bowling,
    Fielding,
    Attacking,
    Defending,
    Passing,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
}

pub const PREFERRED_TIMES: [PreferredTime; 3] = [
    PreferredTime::Morning,
    PreferredTime::Afternoon,
    PreferredTime::Evening,
];

/// Categorical attributes of one profile, tagged by sport so a stored row
/// can never mix enumerations across sports without being caught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum SportTraits {
    Cricket(CricketTraits),
    Football(FootballTraits),
}

impl SportTraits {
    pub fn sport(&self) -> Sport {
        match self {
            SportTraits::Cricket(_) => Sport::Cricket,
            SportTraits::Football(_) => Sport::Football,
        }
    }
}

/// Categorical preference sets, mirroring [`SportTraits`] group for group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum TraitPreference {
    Cricket(cricket::CricketTraitPreference),
    Football(football::FootballTraitPreference),
}

impl TraitPreference {
    pub fn sport(&self) -> Sport {
        match self {
            TraitPreference::Cricket(_) => Sport::Cricket,
            TraitPreference::Football(_) => Sport::Football,
        }
    }

    /// Fully open preference for a sport (every group wildcarded).
    pub fn any_for(sport: Sport) -> Self {
        match sport {
            Sport::Cricket => TraitPreference::Cricket(Default::default()),
            Sport::Football => TraitPreference::Football(Default::default()),
        }
    }
}

/// A profile carried trait data from a different sport than expected. This is
/// a stored-data integrity problem, never a caller error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} traits, found {found}")]
pub struct SportMismatch {
    pub expected: Sport,
    pub found: Sport,
}

/// Per-sport strategy: the parts of scoring and vectorization that depend on
/// the sport's closed enumerations.
pub trait SportSpec: Sync {
    fn sport(&self) -> Sport;

    /// Tracked skills, in the fixed order used by the feature vector.
    fn skill_kinds(&self) -> &'static [SkillKind];

    /// Total feature-vector length for this sport (skills + one-hot trait
    /// groups + availability dimensions).
    fn vector_len(&self) -> usize;

    /// Append the one-hot trait dimensions to a vector under construction.
    fn push_trait_dims(
        &self,
        traits: &SportTraits,
        out: &mut Vec<f64>,
    ) -> Result<(), SportMismatch>;

    /// Domain heuristic rewarding mutually beneficial role pairings,
    /// normalized to [0, 1]. Same-role pairings score mid-low, not zero.
    fn complementary_score(
        &self,
        a: &SportTraits,
        b: &SportTraits,
    ) -> Result<f64, SportMismatch>;

    /// Evaluate each categorical preference group against a candidate's
    /// traits: (group name, candidate allowed).
    fn trait_checks(
        &self,
        preference: &TraitPreference,
        traits: &SportTraits,
    ) -> Result<Vec<(&'static str, bool)>, SportMismatch>;

    /// Store-level pre-filter terms for non-wildcard groups:
    /// (traits JSON field, allowed wire values). Purely a query narrowing
    /// aid; the hard filter re-validates in process.
    fn trait_prefilters(&self, preference: &TraitPreference) -> Vec<(&'static str, Vec<String>)>;
}

/// One dimension per variant; exactly one is hot.
pub(crate) fn push_one_hot<T: PartialEq + Copy>(out: &mut Vec<f64>, value: T, variants: &[T]) {
    for variant in variants {
        out.push(if *variant == value { 1.0 } else { 0.0 });
    }
}
