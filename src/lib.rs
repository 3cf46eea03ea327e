//! Rowing safety conditions for a single river location.
//!
//! Live river flow and weather readings are cached for a fixed freshness
//! window, scored against per-boat-category thresholds and served as one
//! JSON report over HTTP.
//!
//! Module layout follows the Explicit Module Boundary Pattern (EMBP): sibling
//! modules import shared types from this gateway rather than from each other.
//!
//! - `models`     – readings, severities, boat categories, results
//! - `conditions` – threshold tables and verdict aggregation (pure)
//! - `cache`      – freshness cache over the two reading sources
//! - `sources`    – Environment Agency, University of Reading and demo sources
//! - `report`     – the `/api/conditions` payload
//! - `routes`     – axum router
//! - `config`     – environment-driven configuration
use std::sync::Arc;

use anyhow::Result;

pub mod cache;
pub mod conditions;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod routes;
pub mod sources;

pub use cache::{CacheEntry, FreshnessCache, ReadingsSnapshot};
pub use config::Config;
pub use error::AppError;
pub use models::{BoatCategory, ConditionResult, RiverReading, Severity, Verdict, WeatherReading};
pub use report::ConditionsReport;

use sources::{
    DemoRiverSource, DemoWeatherSource, EnvironmentAgencyRiverSource, ReadingSource,
    ReadingWeatherSource,
};

// ---

/// Build the cache with the sources selected by `cfg`.
pub fn build_cache(cfg: &Config) -> Result<FreshnessCache> {
    // ---
    let river: Arc<dyn ReadingSource<RiverReading>>;
    let weather: Arc<dyn ReadingSource<WeatherReading>>;

    if cfg.demo_mode {
        tracing::info!("DEMO MODE enabled, upstream providers will not be called");
        river = Arc::new(DemoRiverSource);
        weather = Arc::new(DemoWeatherSource);
    } else {
        let client = sources::http_client(cfg.fetch_timeout())?;
        river = Arc::new(EnvironmentAgencyRiverSource::new(
            client.clone(),
            cfg.river_api_url.clone(),
        ));
        weather = Arc::new(ReadingWeatherSource::new(client, cfg.weather_url.clone())?);
    }

    Ok(FreshnessCache::new(
        river,
        weather,
        cfg.freshness_window(),
        cfg.fetch_timeout(),
    ))
}
