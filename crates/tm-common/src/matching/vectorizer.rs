use thiserror::Error;

use crate::sports::{SkillKind, Sport, SportMismatch, PREFERRED_TIMES};
use crate::{SportProfile, SKILL_MAX, SKILL_MIN};

use super::similarity;

/// A stored profile that cannot be scored: out-of-scale ratings, missing
/// skills, mixed-sport traits or bogus coordinates. The ranking path skips
/// such candidates instead of failing the whole request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileIntegrityError {
    #[error("{sport} profile is missing a {kind} rating")]
    MissingSkill { sport: Sport, kind: SkillKind },
    #[error("{kind} rating {rating} outside the {min}..={max} scale")]
    SkillOutOfScale { kind: SkillKind, rating: u8, min: u8, max: u8 },
    #[error("invalid coordinates (lon {lon}, lat {lat})")]
    InvalidCoordinates { lon: f64, lat: f64 },
    #[error(transparent)]
    SportMismatch(#[from] SportMismatch),
}

/// Convert a profile into its fixed-length feature vector, every dimension
/// normalized to [0, 1].
///
/// The layout is identical for every profile of the same sport: tracked
/// skills (scale-normalized), one-hot trait groups, weekday/weekend flags,
/// one-hot preferred time. Downstream cosine similarity depends on this
/// alignment.
pub fn vectorize(profile: &SportProfile) -> Result<Vec<f64>, ProfileIntegrityError> {
    let spec = profile.sport.spec();

    if !profile.location.point.is_valid() {
        return Err(ProfileIntegrityError::InvalidCoordinates {
            lon: profile.location.point.lon,
            lat: profile.location.point.lat,
        });
    }

    let mut vector = Vec::with_capacity(spec.vector_len());

    for kind in spec.skill_kinds() {
        let rating = profile
            .skill(*kind)
            .ok_or(ProfileIntegrityError::MissingSkill {
                sport: profile.sport,
                kind: *kind,
            })?;
        if !(SKILL_MIN..=SKILL_MAX).contains(&rating) {
            return Err(ProfileIntegrityError::SkillOutOfScale {
                kind: *kind,
                rating,
                min: SKILL_MIN,
                max: SKILL_MAX,
            });
        }
        vector.push(f64::from(rating) / f64::from(SKILL_MAX));
    }

    spec.push_trait_dims(&profile.traits, &mut vector)?;

    vector.push(if profile.availability.weekdays { 1.0 } else { 0.0 });
    vector.push(if profile.availability.weekends { 1.0 } else { 0.0 });
    for time in PREFERRED_TIMES {
        vector.push(if profile.availability.preferred_time == time {
            1.0
        } else {
            0.0
        });
    }

    debug_assert_eq!(vector.len(), spec.vector_len());
    Ok(vector)
}

/// Cosine similarity of two vectorized profiles.
pub fn feature_similarity(a: &[f64], b: &[f64]) -> f64 {
    similarity::cosine_similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sports::{
        BattingStyle, BowlingStyle, CricketPosition, CricketTraits, PreferredTime, SportTraits,
    };
    use crate::{Availability, GeoPoint, Location};
    use std::collections::BTreeMap;

    fn profile(batting: u8, position: CricketPosition) -> SportProfile {
        let mut skills = BTreeMap::new();
        skills.insert(SkillKind::Batting, batting);
        skills.insert(SkillKind::Bowling, 5);
        skills.insert(SkillKind::Fielding, 6);

        SportProfile {
            id: Some(1),
            user_id: 10,
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
                weekends: false,
                preferred_time: PreferredTime::Evening,
            },
            preference: None,
        }
    }

    #[test]
    fn vector_has_fixed_length_and_normalized_dims() {
        let v = vectorize(&profile(8, CricketPosition::Batsman)).unwrap();

        assert_eq!(v.len(), Sport::Cricket.spec().vector_len());
        assert!(v.iter().all(|d| (0.0..=1.0).contains(d)));
        assert!((v[0] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn dimension_order_is_stable_across_profiles() {
        let a = vectorize(&profile(3, CricketPosition::Bowler)).unwrap();
        let b = vectorize(&profile(9, CricketPosition::Bowler)).unwrap();

        assert_eq!(a.len(), b.len());
        // Everything but the batting dimension is identical.
        assert_eq!(a[1..], b[1..]);
    }

    #[test]
    fn rejects_out_of_scale_rating() {
        let mut p = profile(8, CricketPosition::Batsman);
        p.skills.insert(SkillKind::Bowling, 11);

        let err = vectorize(&p).unwrap_err();
        assert!(matches!(
            err,
            ProfileIntegrityError::SkillOutOfScale { rating: 11, .. }
        ));
    }

    #[test]
    fn rejects_missing_skill() {
        let mut p = profile(8, CricketPosition::Batsman);
        p.skills.remove(&SkillKind::Fielding);

        assert!(matches!(
            vectorize(&p).unwrap_err(),
            ProfileIntegrityError::MissingSkill { kind: SkillKind::Fielding, .. }
        ));
    }

    #[test]
    fn rejects_invalid_coordinates() {
        let mut p = profile(8, CricketPosition::Batsman);
        p.location.point.lat = 95.0;

        assert!(matches!(
            vectorize(&p).unwrap_err(),
            ProfileIntegrityError::InvalidCoordinates { .. }
        ));
    }
}
