use crate::{PartnerPreference, SportProfile, TraitFilter};

use super::vectorizer::ProfileIntegrityError;

/// Outcome of one hard-constraint check. Unlike the soft sub-scores, a
/// single `Reject` excludes the candidate outright.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintDecision {
    Pass,
    Reject { reason: String },
}

impl ConstraintDecision {
    pub fn is_reject(&self) -> bool {
        matches!(self, ConstraintDecision::Reject { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ConstraintDecision::Reject { reason } => Some(reason),
            ConstraintDecision::Pass => None,
        }
    }
}

/// Aggregated hard-filter result across every check.
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub accepted: bool,
    pub decisions: Vec<(&'static str, ConstraintDecision)>,
}

impl FilterResult {
    fn new(decisions: Vec<(&'static str, ConstraintDecision)>) -> Self {
        let accepted = !decisions.iter().any(|(_, d)| d.is_reject());
        Self { accepted, decisions }
    }

    /// Reject reasons joined for logging.
    pub fn reject_reasons(&self) -> Vec<String> {
        self.decisions
            .iter()
            .filter_map(|(name, d)| d.reason().map(|r| format!("{name}: {r}")))
            .collect()
    }
}

/// Run every hard partner-preference constraint against a candidate.
///
/// With no preference set at all, every candidate passes (open search).
/// This gate stays separate from the continuous preference-fit score: a
/// violated constraint must exclude, never merely down-rank.
pub fn check_partner_constraints(
    preference: Option<&PartnerPreference>,
    candidate: &SportProfile,
) -> Result<FilterResult, ProfileIntegrityError> {
    let Some(prefs) = preference else {
        return Ok(FilterResult::new(vec![]));
    };

    let mut decisions = Vec::new();

    for kind in candidate.sport.skill_kinds() {
        let range = prefs.skill_range(*kind);
        let rating = candidate
            .skill(*kind)
            .ok_or(ProfileIntegrityError::MissingSkill {
                sport: candidate.sport,
                kind: *kind,
            })?;

        let decision = if range.contains(rating) {
            ConstraintDecision::Pass
        } else {
            ConstraintDecision::Reject {
                reason: format!("{kind} {rating} outside [{}, {}]", range.min, range.max),
            }
        };
        decisions.push(("skill_range", decision));
    }

    let spec = candidate.sport.spec();
    for (group, allowed) in spec.trait_checks(&prefs.traits, &candidate.traits)? {
        let decision = if allowed {
            ConstraintDecision::Pass
        } else {
            ConstraintDecision::Reject {
                reason: format!("{group} not in preferred set"),
            }
        };
        decisions.push((group, decision));
    }

    let avail = &prefs.availability;
    decisions.push((
        "weekdays",
        if avail.weekdays && !candidate.availability.weekdays {
            ConstraintDecision::Reject {
                reason: "weekday availability required".into(),
            }
        } else {
            ConstraintDecision::Pass
        },
    ));
    decisions.push((
        "weekends",
        if avail.weekends && !candidate.availability.weekends {
            ConstraintDecision::Reject {
                reason: "weekend availability required".into(),
            }
        } else {
            ConstraintDecision::Pass
        },
    ));

    let time_decision = match &avail.preferred_times {
        TraitFilter::Any => ConstraintDecision::Pass,
        filter if filter.allows(&candidate.availability.preferred_time) => {
            ConstraintDecision::Pass
        }
        _ => ConstraintDecision::Reject {
            reason: format!(
                "preferred time {} not in preferred set",
                candidate.availability.preferred_time
            ),
        },
    };
    decisions.push(("preferred_time", time_decision));

    Ok(FilterResult::new(decisions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sports::{
        BattingStyle, BowlingStyle, CricketPosition, CricketTraitPreference, CricketTraits,
        PreferredTime, SkillKind, Sport, SportTraits, TraitPreference,
    };
    use crate::{
        Availability, AvailabilityPreference, GeoPoint, Location, SkillRange,
    };
    use std::collections::BTreeMap;

    fn candidate(batting: u8) -> SportProfile {
        let mut skills = BTreeMap::new();
        skills.insert(SkillKind::Batting, batting);
        skills.insert(SkillKind::Bowling, 5);
        skills.insert(SkillKind::Fielding, 5);

        SportProfile {
            id: Some(2),
            user_id: 20,
            sport: Sport::Cricket,
            skills,
            traits: SportTraits::Cricket(CricketTraits {
                batting_style: BattingStyle::RightHanded,
                bowling_style: BowlingStyle::Spin,
                position: CricketPosition::Bowler,
            }),
            location: Location {
                point: GeoPoint { lon: 77.2, lat: 28.6 },
                address: "Delhi".into(),
            },
            availability: Availability {
                weekdays: false,
                weekends: true,
                preferred_time: PreferredTime::Evening,
            },
            preference: None,
        }
    }

    fn preference() -> PartnerPreference {
        PartnerPreference {
            skill_ranges: BTreeMap::new(),
            traits: TraitPreference::any_for(Sport::Cricket),
            availability: AvailabilityPreference::default(),
            complementary_skills: false,
            max_distance_km: None,
        }
    }

    #[test]
    fn unset_preference_accepts_every_candidate() {
        let result = check_partner_constraints(None, &candidate(1)).unwrap();
        assert!(result.accepted);
        assert!(result.decisions.is_empty());
    }

    #[test]
    fn skill_one_unit_outside_range_is_rejected() {
        let mut prefs = preference();
        prefs
            .skill_ranges
            .insert(SkillKind::Batting, SkillRange { min: 3, max: 7 });

        let inside = check_partner_constraints(Some(&prefs), &candidate(7)).unwrap();
        assert!(inside.accepted);

        let outside = check_partner_constraints(Some(&prefs), &candidate(8)).unwrap();
        assert!(!outside.accepted);
        assert!(outside.reject_reasons()[0].contains("batting"));
    }

    #[test]
    fn trait_set_membership_is_enforced() {
        let mut prefs = preference();
        prefs.traits = TraitPreference::Cricket(CricketTraitPreference {
            positions: TraitFilter::OneOf(vec![CricketPosition::Batsman]),
            ..Default::default()
        });

        let result = check_partner_constraints(Some(&prefs), &candidate(5)).unwrap();
        assert!(!result.accepted);
    }

    #[test]
    fn weekday_requirement_rejects_weekend_only_players() {
        let mut prefs = preference();
        prefs.availability.weekdays = true;

        let result = check_partner_constraints(Some(&prefs), &candidate(5)).unwrap();
        assert!(!result.accepted);
        assert!(result
            .reject_reasons()
            .iter()
            .any(|r| r.contains("weekday")));
    }

    #[test]
    fn preferred_time_set_is_enforced_unless_wildcarded() {
        let mut prefs = preference();
        prefs.availability.preferred_times =
            TraitFilter::OneOf(vec![PreferredTime::Morning, PreferredTime::Afternoon]);

        let result = check_partner_constraints(Some(&prefs), &candidate(5)).unwrap();
        assert!(!result.accepted);

        prefs.availability.preferred_times = TraitFilter::Any;
        let result = check_partner_constraints(Some(&prefs), &candidate(5)).unwrap();
        assert!(result.accepted);
    }

    #[test]
    fn missing_candidate_skill_is_an_integrity_error() {
        let mut prefs = preference();
        prefs
            .skill_ranges
            .insert(SkillKind::Batting, SkillRange { min: 1, max: 10 });

        let mut broken = candidate(5);
        broken.skills.remove(&SkillKind::Bowling);

        assert!(check_partner_constraints(Some(&prefs), &broken).is_err());
    }
}
