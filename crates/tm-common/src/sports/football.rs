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
pub enum PreferredFoot {
    Left,
    Right,
    Both,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayingStyle {
    Possession,
    CounterAttacking,
    HighPressing,
    Defensive,
    WingPlay,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FootballPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    Winger,
}

const FEET: [PreferredFoot; 3] = [PreferredFoot::Left, PreferredFoot::Right, PreferredFoot::Both];
const STYLES: [PlayingStyle; 5] = [
    PlayingStyle::Possession,
    PlayingStyle::CounterAttacking,
    PlayingStyle::HighPressing,
    PlayingStyle::Defensive,
    PlayingStyle::WingPlay,
];
const POSITIONS: [FootballPosition; 5] = [
    FootballPosition::Goalkeeper,
    FootballPosition::Defender,
    FootballPosition::Midfielder,
    FootballPosition::Forward,
    FootballPosition::Winger,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootballTraits {
    pub preferred_foot: PreferredFoot,
    pub playing_style: PlayingStyle,
    pub position: FootballPosition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootballTraitPreference {
    #[serde(default)]
    pub feet: TraitFilter<PreferredFoot>,
    #[serde(default)]
    pub playing_styles: TraitFilter<PlayingStyle>,
    #[serde(default)]
    pub positions: TraitFilter<FootballPosition>,
}

pub struct FootballSpec;

const SKILLS: [SkillKind; 3] = [
    SkillKind::Attacking,
    SkillKind::Defending,
    SkillKind::Passing,
];

fn unwrap_traits(traits: &SportTraits) -> Result<&FootballTraits, SportMismatch> {
    match traits {
        SportTraits::Football(t) => Ok(t),
        other => Err(SportMismatch {
            expected: Sport::Football,
            found: other.sport(),
        }),
    }
}

/// Pairings that cover both ends of the pitch in a kick-about.
fn role_pair_score(a: FootballPosition, b: FootballPosition) -> f64 {
    use FootballPosition::*;

    match (a, b) {
        (Forward, Defender)
        | (Defender, Forward)
        | (Forward, Goalkeeper)
        | (Goalkeeper, Forward)
        | (Winger, Defender)
        | (Defender, Winger)
        | (Midfielder, Forward)
        | (Forward, Midfielder) => 1.0,
        _ if a == b => 0.5,
        _ => 0.7,
    }
}

/// A left-footed winger drilling against a right-sided defender (and vice
/// versa) is the beneficial practice setup; pressing vs possession styles
/// also sharpen each other.
fn style_pair_score(a: &FootballTraits, b: &FootballTraits) -> f64 {
    let opposite_feet = matches!(
        (a.preferred_foot, b.preferred_foot),
        (PreferredFoot::Left, PreferredFoot::Right) | (PreferredFoot::Right, PreferredFoot::Left)
    );
    let contrasting_styles = matches!(
        (a.playing_style, b.playing_style),
        (PlayingStyle::Possession, PlayingStyle::HighPressing)
            | (PlayingStyle::HighPressing, PlayingStyle::Possession)
            | (PlayingStyle::CounterAttacking, PlayingStyle::Defensive)
            | (PlayingStyle::Defensive, PlayingStyle::CounterAttacking)
    );

    if opposite_feet || contrasting_styles {
        1.0
    } else {
        0.6
    }
}

impl SportSpec for FootballSpec {
    fn sport(&self) -> Sport {
        Sport::Football
    }

    fn skill_kinds(&self) -> &'static [SkillKind] {
        &SKILLS
    }

    fn vector_len(&self) -> usize {
        SKILLS.len() + POSITIONS.len() + FEET.len() + STYLES.len() + 2 + 3
    }

    fn push_trait_dims(
        &self,
        traits: &SportTraits,
        out: &mut Vec<f64>,
    ) -> Result<(), SportMismatch> {
        let traits = unwrap_traits(traits)?;
        push_one_hot(out, traits.position, &POSITIONS);
        push_one_hot(out, traits.preferred_foot, &FEET);
        push_one_hot(out, traits.playing_style, &STYLES);
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
            TraitPreference::Football(p) => p,
            other => {
                return Err(SportMismatch {
                    expected: Sport::Football,
                    found: other.sport(),
                })
            }
        };
        let traits = unwrap_traits(traits)?;

        Ok(vec![
            ("preferred_foot", prefs.feet.allows(&traits.preferred_foot)),
            (
                "playing_style",
                prefs.playing_styles.allows(&traits.playing_style),
            ),
            ("position", prefs.positions.allows(&traits.position)),
        ])
    }

    fn trait_prefilters(&self, preference: &TraitPreference) -> Vec<(&'static str, Vec<String>)> {
        let TraitPreference::Football(prefs) = preference else {
            return vec![];
        };

        let mut terms = Vec::new();
        if let TraitFilter::OneOf(values) = &prefs.feet {
            terms.push((
                "preferred_foot",
                values.iter().map(|v| v.as_ref().to_string()).collect(),
            ));
        }
        if let TraitFilter::OneOf(values) = &prefs.playing_styles {
            terms.push((
                "playing_style",
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

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(
        preferred_foot: PreferredFoot,
        playing_style: PlayingStyle,
        position: FootballPosition,
    ) -> SportTraits {
        SportTraits::Football(FootballTraits {
            preferred_foot,
            playing_style,
            position,
        })
    }

    #[test]
    fn forward_defender_pairing_beats_identical_roles() {
        let forward = traits(
            PreferredFoot::Right,
            PlayingStyle::CounterAttacking,
            FootballPosition::Forward,
        );
        let defender = traits(
            PreferredFoot::Right,
            PlayingStyle::Defensive,
            FootballPosition::Defender,
        );

        let complementary = FootballSpec
            .complementary_score(&forward, &defender)
            .unwrap();
        let same = FootballSpec.complementary_score(&forward, &forward).unwrap();

        assert!(complementary > same);
    }

    #[test]
    fn vector_len_counts_every_dimension_group() {
        // 3 skills + 5 positions + 3 feet + 5 styles + 2 flags + 3 times
        assert_eq!(FootballSpec.vector_len(), 21);
    }

    #[test]
    fn checks_fail_on_cricket_traits() {
        let prefs = TraitPreference::any_for(Sport::Football);
        let cricket = SportTraits::Cricket(crate::sports::CricketTraits {
            batting_style: crate::sports::BattingStyle::RightHanded,
            bowling_style: crate::sports::BowlingStyle::Spin,
            position: crate::sports::CricketPosition::Bowler,
        });

        assert!(FootballSpec.trait_checks(&prefs, &cricket).is_err());
    }
}
