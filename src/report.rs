//! Conditions report: the payload served by `GET /api/conditions`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::ReadingsSnapshot;
use crate::conditions;
use crate::error::AppError;
use crate::models::{BoatCategory, ConditionResult};

// ---

#[derive(Debug, Serialize)]
pub struct ConditionsReport {
    // ---
    pub timestamp: DateTime<Utc>,
    pub data: CurrentReadings,
    pub conditions: BTreeMap<BoatCategory, ConditionResult>,
    pub cache_age: CacheAge,
}

/// Measurements the verdicts were computed from.
#[derive(Debug, Serialize)]
pub struct CurrentReadings {
    // ---
    pub river_flow: f64,
    pub river_datetime: DateTime<Utc>,
    pub temperature: f64,
    pub wind_speed: f64,
    pub weather_observation: Option<String>,
}

/// Seconds since each entry was last refreshed.
#[derive(Debug, Serialize)]
pub struct CacheAge {
    // ---
    pub river: Option<i64>,
    pub weather: Option<i64>,
}

/// Build the report from one cache snapshot.
///
/// Returns [`AppError::DataUnavailable`] if either reading has never been
/// fetched successfully; partial reports are never produced.
pub fn build(
    snapshot: &ReadingsSnapshot,
    now: DateTime<Utc>,
) -> Result<ConditionsReport, AppError> {
    // ---
    let (Some(river), Some(weather)) = (snapshot.river.value(), snapshot.weather.value()) else {
        return Err(AppError::DataUnavailable);
    };

    Ok(ConditionsReport {
        timestamp: now,
        data: CurrentReadings {
            river_flow: river.flow,
            river_datetime: river.observed_at,
            temperature: weather.temperature,
            wind_speed: weather.wind_gust,
            weather_observation: weather.observed_at.clone(),
        },
        conditions: conditions::evaluate(river, weather),
        cache_age: CacheAge {
            river: snapshot.river.age_secs(now),
            weather: snapshot.weather.age_secs(now),
        },
    })
}
