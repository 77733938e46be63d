use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::TraitFilter;

use super::{
    push_one_hot, SkillKind, Sport, SportMismatch, SportSpec, SportTraits, TraitPreference,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BattingStyle {
    RightHanded,
    LeftHanded,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BowlingStyle {
    Fast,
    Medium,
    Spin,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CricketPosition {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

const BATTING_STYLES: [BattingStyle; 2] = [BattingStyle::RightHanded, BattingStyle::LeftHanded];
const BOWLING_STYLES: [BowlingStyle; 3] =
    [BowlingStyle::Fast, BowlingStyle::Medium, BowlingStyle::Spin];
const POSITIONS: [CricketPosition; 4] = [
    CricketPosition::Batsman,
    CricketPosition::Bowler,
    CricketPosition::AllRounder,
    CricketPosition::WicketKeeper,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketTraits {
    pub batting_style: BattingStyle,
    pub bowling_style: BowlingStyle,
    pub position: CricketPosition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketTraitPreference {
    #[serde(default)]
    pub batting_styles: TraitFilter<BattingStyle>,
    #[serde(default)]
    pub bowling_styles: TraitFilter<BowlingStyle>,
    #[serde(default)]
    pub positions: TraitFilter<CricketPosition>,
}

pub struct CricketSpec;

const SKILLS: [SkillKind; 3] = [SkillKind::Batting, SkillKind::Bowling, SkillKind::Fielding];

fn unwrap_traits(traits: &SportTraits) -> Result<&CricketTraits, SportMismatch> {
    match traits {
        SportTraits::Cricket(t) => Ok(t),
        other => Err(SportMismatch {
            expected: Sport::Cricket,
            found: other.sport(),
        }),
    }
}

/// Role pairings a cricket organizer would consider mutually beneficial.
fn role_pair_score(a: CricketPosition, b: CricketPosition) -> f64 {
    use CricketPosition::*;

    match (a, b) {
        (Batsman, Bowler) | (Bowler, Batsman) | (Bowler, WicketKeeper) | (Batsman, AllRounder) => {
            1.0
        }
        _ if a == b => 0.5,
        _ => 0.7,
    }
}

/// A spinner against a right-hander and a quick against a left-hander are
/// the classic net-practice pairings.
fn style_pair_score(a: &CricketTraits, b: &CricketTraits) -> f64 {
    let favourable = matches!(
        (a.batting_style, b.bowling_style),
        (BattingStyle::RightHanded, BowlingStyle::Spin)
            | (BattingStyle::LeftHanded, BowlingStyle::Fast)
    ) || matches!(
        (a.bowling_style, b.batting_style),
        (BowlingStyle::Spin, BattingStyle::RightHanded)
            | (BowlingStyle::Fast, BattingStyle::LeftHanded)
    );

    if favourable {
        1.0
    } else {
        0.6
    }
}

impl SportSpec for CricketSpec {
    fn sport(&self) -> Sport {
        Sport::Cricket
    }

    fn skill_kinds(&self) -> &'static [SkillKind] {
        &SKILLS
    }

    fn vector_len(&self) -> usize {
        // 3 skills + 4 positions + 2 batting styles + 3 bowling styles
        // + weekday/weekend flags + 3 preferred times
        SKILLS.len() + POSITIONS.len() + BATTING_STYLES.len() + BOWLING_STYLES.len() + 2 + 3
    }

    fn push_trait_dims(
        &self,
        traits: &SportTraits,
        out: &mut Vec<f64>,
    ) -> Result<(), SportMismatch> {
        let traits = unwrap_traits(traits)?;
        push_one_hot(out, traits.position, &POSITIONS);
        push_one_hot(out, traits.batting_style, &BATTING_STYLES);
        push_one_hot(out, traits.bowling_style, &BOWLING_STYLES);
        Ok(())
    }

    fn complementary_score(
        &self,
        a: &SportTraits,
        b: &SportTraits,
    ) -> Result<f64, SportMismatch> {
        let a = unwrap_traits(a)?;
        let b = unwrap_traits(b)?;

        let total = role_pair_score(a.position, b.position) + style_pair_score(a, b);
        Ok(total / 2.0)
    }

    fn trait_checks(
        &self,
        preference: &TraitPreference,
        traits: &SportTraits,
    ) -> Result<Vec<(&'static str, bool)>, SportMismatch> {
        let prefs = match preference {
            TraitPreference::Cricket(p) => p,
            other => {
                return Err(SportMismatch {
                    expected: Sport::Cricket,
                    found: other.sport(),
                })
            }
        };
        let traits = unwrap_traits(traits)?;

        Ok(vec![
            (
                "batting_style",
                prefs.batting_styles.allows(&traits.batting_style),
            ),
            (
                "bowling_style",
                prefs.bowling_styles.allows(&traits.bowling_style),
            ),
            ("position", prefs.positions.allows(&traits.position)),
        ])
    }

    fn trait_prefilters(&self, preference: &TraitPreference) -> Vec<(&'static str, Vec<String>)> {
        let TraitPreference::Cricket(prefs) = preference else {
            return vec![];
        };

        let mut terms = Vec::new();
        if let TraitFilter::OneOf(values) = &prefs.batting_styles {
            terms.push((
                "batting_style",
                values.iter().map(|v| v.as_ref().to_string()).collect(),
            ));
        }
        if let TraitFilter::OneOf(values) = &prefs.bowling_styles {
            terms.push((
                "bowling_style",
                values.iter().map(|v| v.as_ref().to_string()).collect(),
            ));
        }
        if let TraitFilter::OneOf(values) = &prefs.positions {
            terms.push((
                "position",
                values.iter().map(|v| v.as_ref().to_string()).collect(),
            ));
        }
        terms
    }
}
