use deadpool_postgres::PoolError;
use serde_json::Value;
use std::str::FromStr;
use tokio_postgres::types::ToSql;
use tokio_postgres::Error as PgError;
use tracing::{instrument, warn};

use crate::api::profile::{ProfileStatus, UpsertProfileResponse};
use crate::db::PgPool;
use crate::sports::{PreferredTime, SkillKind, Sport};
use crate::{
    Availability, GeoPoint, Location, SkillRange, SportProfile, SKILL_MAX, SKILL_MIN,
};

#[derive(Debug, thiserror::Error)]
pub enum ProfileStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("profile rejected: {0}")]
    Invalid(String),
    #[error("profile payload codec error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to map profile row: {0}")]
    Mapping(String),
}

fn validate_profile(profile: &SportProfile) -> Result<(), ProfileStorageError> {
    if !profile.location.point.is_valid() {
        return Err(ProfileStorageError::Invalid(format!(
            "coordinates out of range: ({}, {})",
            profile.location.point.lon, profile.location.point.lat
        )));
    }

    if profile.traits.sport() != profile.sport {
        return Err(ProfileStorageError::Invalid(format!(
            "traits belong to {}, profile is {}",
            profile.traits.sport(),
            profile.sport
        )));
    }

    for kind in profile.sport.skill_kinds() {
        match profile.skill(*kind) {
            None => {
                return Err(ProfileStorageError::Invalid(format!(
                    "missing {kind} rating"
                )))
            }
            Some(rating) if !(SKILL_MIN..=SKILL_MAX).contains(&rating) => {
                return Err(ProfileStorageError::Invalid(format!(
                    "{kind} rating {rating} outside [{SKILL_MIN}, {SKILL_MAX}]"
                )))
            }
            Some(_) => {}
        }
    }

    if let Some(preference) = &profile.preference {
        for (kind, range) in &preference.skill_ranges {
            if range.min > range.max
                || range.min < SKILL_MIN
                || range.max > SKILL_MAX
            {
                return Err(ProfileStorageError::Invalid(format!(
                    "preferred {kind} range [{}, {}] is not a valid sub-range",
                    range.min, range.max
                )));
            }
        }
        if preference.traits.sport() != profile.sport {
            return Err(ProfileStorageError::Invalid(format!(
                "preference traits belong to {}, profile is {}",
                preference.traits.sport(),
                profile.sport
            )));
        }
    }

    Ok(())
}

/// Insert or replace the (user, sport) profile in one atomic statement.
#[instrument(skip(pool, profile), fields(user_id = profile.user_id, sport = %profile.sport))]
pub async fn upsert_profile(
    pool: &PgPool,
    profile: &SportProfile,
) -> Result<UpsertProfileResponse, ProfileStorageError> {
    validate_profile(profile)?;

    let skills = serde_json::to_value(&profile.skills)?;
    let traits = serde_json::to_value(&profile.traits)?;
    let preference = profile
        .preference
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            "INSERT INTO tm.sport_profiles (\
                user_id, sport, skills, traits,\
                lon, lat, address,\
                weekdays, weekends, preferred_time, preference\
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)\
            ON CONFLICT (user_id, sport) DO UPDATE\
            SET skills = EXCLUDED.skills,\
                traits = EXCLUDED.traits,\
                lon = EXCLUDED.lon,\
                lat = EXCLUDED.lat,\
                address = EXCLUDED.address,\
                weekdays = EXCLUDED.weekdays,\
                weekends = EXCLUDED.weekends,\
                preferred_time = EXCLUDED.preferred_time,\
                preference = EXCLUDED.preference,\
                updated_at = NOW()\
            RETURNING id, xmax = 0 AS inserted",
        )
        .await?;

    let row = client
        .query_one(
            &stmt,
            &[
                &profile.user_id,
                &profile.sport.as_ref(),
                &skills,
                &traits,
                &profile.location.point.lon,
                &profile.location.point.lat,
                &profile.location.address,
                &profile.availability.weekdays,
                &profile.availability.weekends,
                &profile.availability.preferred_time.as_ref(),
                &preference,
            ],
        )
        .await?;

    let inserted: bool = row.get("inserted");
    Ok(UpsertProfileResponse {
        id: row.get("id"),
        user_id: profile.user_id,
        status: if inserted {
            ProfileStatus::Created
        } else {
            ProfileStatus::Updated
        },
    })
}

fn row_to_profile(row: &tokio_postgres::Row) -> Result<SportProfile, ProfileStorageError> {
    let sport_name: String = row.get("sport");
    let sport = Sport::from_str(&sport_name)
        .map_err(|_| ProfileStorageError::Mapping(format!("unknown sport {sport_name:?}")))?;

    let time_name: String = row.get("preferred_time");
    let preferred_time = PreferredTime::from_str(&time_name).map_err(|_| {
        ProfileStorageError::Mapping(format!("unknown preferred time {time_name:?}"))
    })?;

    let skills = serde_json::from_value(row.get::<_, Value>("skills"))
        .map_err(|e| ProfileStorageError::Mapping(format!("skills column: {e}")))?;
    let traits = serde_json::from_value(row.get::<_, Value>("traits"))
        .map_err(|e| ProfileStorageError::Mapping(format!("traits column: {e}")))?;
    let preference = row
        .get::<_, Option<Value>>("preference")
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| ProfileStorageError::Mapping(format!("preference column: {e}")))?;

    Ok(SportProfile {
        id: Some(row.get("id")),
        user_id: row.get("user_id"),
        sport,
        skills,
        traits,
        location: Location {
            point: GeoPoint {
                lon: row.get("lon"),
                lat: row.get("lat"),
            },
            address: row.get("address"),
        },
        availability: Availability {
            weekdays: row.get("weekdays"),
            weekends: row.get("weekends"),
            preferred_time,
        },
        preference,
    })
}

const PROFILE_COLUMNS: &str = "id, user_id, sport, skills, traits, lon, lat, address, \
     weekdays, weekends, preferred_time, preference";

#[instrument(skip(pool))]
pub async fn fetch_profile(
    pool: &PgPool,
    user_id: i64,
    sport: Sport,
) -> Result<Option<SportProfile>, ProfileStorageError> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(&format!(
            "SELECT {PROFILE_COLUMNS} FROM tm.sport_profiles \
             WHERE user_id = $1 AND sport = $2"
        ))
        .await?;

    match client
        .query_opt(&stmt, &[&user_id, &sport.as_ref()])
        .await?
    {
        Some(row) => Ok(Some(row_to_profile(&row)?)),
        None => Ok(None),
    }
}

/// Hard constraints pushed into the candidate query so obviously-ineligible
/// rows never leave the store. The in-process filter re-checks all of them.
#[derive(Debug, Clone, Default)]
pub struct CandidatePrefilters {
    /// Categorical trait constraints as `(traits key, allowed values)`.
    pub traits: Vec<(&'static str, Vec<String>)>,
    /// Constraining skill ranges; full-scale ranges are omitted.
    pub skill_ranges: Vec<(SkillKind, SkillRange)>,
    pub weekdays: bool,
    pub weekends: bool,
    /// Allowed preferred-time values; empty means wildcarded.
    pub preferred_times: Vec<String>,
}

/// Candidate retrieval: same sport, not the requester, inside a great-circle
/// radius, with preference constraints pushed into SQL. Rows that fail to
/// decode are logged and dropped instead of failing the search.
#[instrument(skip(pool, prefilters))]
pub async fn fetch_profiles_within_radius(
    pool: &PgPool,
    sport: Sport,
    exclude_user: i64,
    origin: GeoPoint,
    max_distance_km: f64,
    prefilters: &CandidatePrefilters,
) -> Result<Vec<SportProfile>, ProfileStorageError> {
    let client = pool.get().await?;

    let sport_name = sport.as_ref();
    let skill_bounds: Vec<(SkillKind, i32, i32)> = prefilters
        .skill_ranges
        .iter()
        .map(|(kind, range)| (*kind, i32::from(range.min), i32::from(range.max)))
        .collect();

    let mut params: Vec<&(dyn ToSql + Sync)> = vec![
        &sport_name,
        &exclude_user,
        &origin.lat,
        &origin.lon,
        &max_distance_km,
    ];

    // Haversine over the stored coordinates; $3 = origin lat, $4 = origin lon.
    let distance_expr = "6371.0 * 2.0 * asin(sqrt(\
            power(sin(radians(lat - $3) / 2.0), 2)\
            + cos(radians($3)) * cos(radians(lat))\
            * power(sin(radians(lon - $4) / 2.0), 2)))";

    let mut conditions = vec![
        "sport = $1".to_string(),
        "user_id <> $2".to_string(),
        format!("{distance_expr} <= $5"),
    ];

    for (field, values) in &prefilters.traits {
        params.push(values);
        conditions.push(format!("traits->>'{field}' = ANY(${})", params.len()));
    }

    for (kind, min, max) in &skill_bounds {
        params.push(min);
        params.push(max);
        conditions.push(format!(
            "(skills->>'{}')::int BETWEEN ${} AND ${}",
            kind.as_ref(),
            params.len() - 1,
            params.len()
        ));
    }

    if prefilters.weekdays {
        conditions.push("weekdays".to_string());
    }
    if prefilters.weekends {
        conditions.push("weekends".to_string());
    }
    if !prefilters.preferred_times.is_empty() {
        params.push(&prefilters.preferred_times);
        conditions.push(format!("preferred_time = ANY(${})", params.len()));
    }

    let where_clause = conditions.join(" AND ");
    let query = format!(
        "SELECT {PROFILE_COLUMNS} FROM tm.sport_profiles \
         WHERE {where_clause} \
         ORDER BY user_id"
    );

    let rows = client.query(&query, &params).await?;

    let mut profiles = Vec::with_capacity(rows.len());
    for row in rows {
        match row_to_profile(&row) {
            Ok(profile) => profiles.push(profile),
            Err(err) => warn!(error = %err, "skipping unreadable profile row"),
        }
    }

    Ok(profiles)
}
