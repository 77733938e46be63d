use serde::{Deserialize, Serialize};

use crate::sports::SportMismatch;
use crate::{PartnerPreference, SportProfile, TraitFilter, SKILL_MAX};

use super::vectorizer::ProfileIntegrityError;

/// Every soft sub-score for one (requester, candidate) pair, each in [0, 1].
/// Emitted with the final score so result-detail views can explain a ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub feature_similarity: f64,
    pub complementary: f64,
    pub skill_balance: f64,
    pub availability: f64,
    pub preference_fit: f64,
    pub interaction_affinity: f64,
}

/// Sport-specific pairing heuristic, gated on the requester's
/// "prefer complementary skills" flag. Without the flag the dimension is
/// neutral rather than absent so the weight table keeps summing to one.
pub fn complementary_score(
    preference: Option<&PartnerPreference>,
    requester: &SportProfile,
    candidate: &SportProfile,
) -> Result<f64, SportMismatch> {
    let wants_complementary = preference.is_some_and(|p| p.complementary_skills);
    if !wants_complementary {
        return Ok(0.5);
    }

    requester
        .sport
        .spec()
        .complementary_score(&requester.traits, &candidate.traits)
}

/// Rewards players of comparable overall ability: one minus the normalized
/// absolute difference of the two mean skill ratings.
pub fn skill_balance_score(requester: &SportProfile, candidate: &SportProfile) -> f64 {
    let diff = (requester.mean_skill() - candidate.mean_skill()).abs();
    1.0 - diff / f64::from(SKILL_MAX)
}

/// Additive overlap: equal credit for shared weekday availability, shared
/// weekend availability and a matching preferred time, normalized to [0, 1].
pub fn availability_score(requester: &SportProfile, candidate: &SportProfile) -> f64 {
    let mut score = 0.0;
    if requester.availability.weekdays && candidate.availability.weekdays {
        score += 0.5;
    }
    if requester.availability.weekends && candidate.availability.weekends {
        score += 0.5;
    }
    if requester.availability.preferred_time == candidate.availability.preferred_time {
        score += 1.0;
    }
    score / 2.0
}

/// How well the candidate sits inside the requester's explicit preferences,
/// averaged across every preference dimension.
///
/// Skill factors reward closeness to the *center* of the preferred range,
/// not mere membership; a range spanning the whole scale expresses no
/// constraint and scores 1.0, so a fully wildcarded preference fits
/// perfectly. With no preference at all the score is the neutral maximum.
pub fn preference_fit_score(
    preference: Option<&PartnerPreference>,
    candidate: &SportProfile,
) -> Result<f64, ProfileIntegrityError> {
    let Some(prefs) = preference else {
        return Ok(1.0);
    };

    let mut score = 0.0;
    let mut factors = 0usize;

    for kind in candidate.sport.skill_kinds() {
        let rating = candidate
            .skill(*kind)
            .ok_or(ProfileIntegrityError::MissingSkill {
                sport: candidate.sport,
                kind: *kind,
            })?;
        let range = prefs.skill_range(*kind);

        let factor = if range.is_unconstrained() {
            1.0
        } else {
            let span = f64::from(range.max - range.min);
            let span = if span > 0.0 { span } else { f64::from(SKILL_MAX) };
            let center = f64::from(range.min) + f64::from(range.max - range.min) / 2.0;
            (1.0 - (f64::from(rating) - center).abs() / span).clamp(0.0, 1.0)
        };
        score += factor;
        factors += 1;
    }

    let spec = candidate.sport.spec();
    for (_, allowed) in spec.trait_checks(&prefs.traits, &candidate.traits)? {
        score += if allowed { 1.0 } else { 0.1 };
        factors += 1;
    }

    let mut avail = 0.0;
    if !prefs.availability.weekdays || candidate.availability.weekdays {
        avail += 0.5;
    }
    if !prefs.availability.weekends || candidate.availability.weekends {
        avail += 0.5;
    }
    let time_ok = match &prefs.availability.preferred_times {
        TraitFilter::Any => true,
        filter => filter.allows(&candidate.availability.preferred_time),
    };
    if time_ok {
        avail += 1.0;
    }
    score += avail / 2.0;
    factors += 1;

    Ok(score / factors as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sports::{
        BattingStyle, BowlingStyle, CricketPosition, CricketTraits, PreferredTime, SkillKind,
        Sport, SportTraits, TraitPreference,
    };
    use crate::{
        Availability, AvailabilityPreference, GeoPoint, Location, SkillRange,
    };
    use std::collections::BTreeMap;

    fn profile(batting: u8, bowling: u8, fielding: u8, position: CricketPosition) -> SportProfile {
        let mut skills = BTreeMap::new();
        skills.insert(SkillKind::Batting, batting);
        skills.insert(SkillKind::Bowling, bowling);
        skills.insert(SkillKind::Fielding, fielding);

        SportProfile {
            id: None,
            user_id: 1,
            sport: Sport::Cricket,
            skills,
            traits: SportTraits::Cricket(CricketTraits {
                batting_style: BattingStyle::RightHanded,
                bowling_style: BowlingStyle::Medium,
                position,
            }),
            location: Location {
                point: GeoPoint { lon: 77.2, lat: 28.6 },
                address: "Delhi".into(),
            },
            availability: Availability {
                weekdays: true,
                weekends: true,
                preferred_time: PreferredTime::Evening,
            },
            preference: None,
        }
    }

    fn open_preference() -> PartnerPreference {
        PartnerPreference {
            skill_ranges: BTreeMap::new(),
            traits: TraitPreference::any_for(Sport::Cricket),
            availability: AvailabilityPreference::default(),
            complementary_skills: false,
            max_distance_km: None,
        }
    }

    #[test]
    fn skill_balance_rewards_comparable_ability() {
        let a = profile(8, 8, 8, CricketPosition::Batsman);
        let close = profile(7, 7, 7, CricketPosition::Batsman);
        let far = profile(2, 2, 2, CricketPosition::Batsman);

        assert!(skill_balance_score(&a, &close) > skill_balance_score(&a, &far));
        assert!((skill_balance_score(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn availability_overlap_is_additive() {
        let a = profile(5, 5, 5, CricketPosition::Batsman);
        let mut b = a.clone();

        assert_eq!(availability_score(&a, &b), 1.0);

        b.availability.preferred_time = PreferredTime::Morning;
        assert_eq!(availability_score(&a, &b), 0.5);

        b.availability.weekdays = false;
        b.availability.weekends = false;
        assert_eq!(availability_score(&a, &b), 0.0);

        b.availability.preferred_time = PreferredTime::Evening;
        assert_eq!(availability_score(&a, &b), 0.5);
    }

    #[test]
    fn complementary_defaults_to_neutral_without_flag() {
        let a = profile(5, 5, 5, CricketPosition::Batsman);
        let b = profile(5, 5, 5, CricketPosition::Bowler);

        let score = complementary_score(None, &a, &b).unwrap();
        assert_eq!(score, 0.5);

        let mut prefs = open_preference();
        prefs.complementary_skills = true;
        let score = complementary_score(Some(&prefs), &a, &b).unwrap();
        assert!(score > 0.5);
    }

    #[test]
    fn no_preference_yields_neutral_maximum_fit() {
        let candidate = profile(9, 2, 4, CricketPosition::WicketKeeper);
        assert_eq!(preference_fit_score(None, &candidate).unwrap(), 1.0);
    }

    #[test]
    fn fully_wildcarded_preference_fits_perfectly() {
        let candidate = profile(9, 2, 4, CricketPosition::WicketKeeper);
        let prefs = open_preference();
        assert_eq!(preference_fit_score(Some(&prefs), &candidate).unwrap(), 1.0);
    }

    #[test]
    fn center_of_range_beats_edge_of_range() {
        let mut prefs = open_preference();
        prefs
            .skill_ranges
            .insert(SkillKind::Batting, SkillRange { min: 6, max: 10 });

        // Range center is 8: a 9 sits closer than a 10 at the edge.
        let near_center = profile(9, 5, 5, CricketPosition::Batsman);
        let at_edge = profile(10, 5, 5, CricketPosition::Batsman);

        let near = preference_fit_score(Some(&prefs), &near_center).unwrap();
        let edge = preference_fit_score(Some(&prefs), &at_edge).unwrap();
        assert!(near > edge, "{near} vs {edge}");
    }

    #[test]
    fn unmatched_trait_group_scores_low_not_zero() {
        let mut prefs = open_preference();
        prefs.traits = TraitPreference::Cricket(crate::sports::CricketTraitPreference {
            positions: crate::TraitFilter::OneOf(vec![CricketPosition::Bowler]),
            ..Default::default()
        });

        let candidate = profile(5, 5, 5, CricketPosition::Batsman);
        let fit = preference_fit_score(Some(&prefs), &candidate).unwrap();
        assert!(fit < 1.0);
        assert!(fit > 0.0);
    }
}
