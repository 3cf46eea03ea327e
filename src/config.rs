//! Configuration loader for the rowing conditions service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Every variable is optional; an unset variable
//! falls back to the production default, a malformed one is a startup error.
use std::env;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};

/// Default river flow measure (Thames at Reading, 15-minute mean, m³/s).
pub const DEFAULT_RIVER_API_URL: &str =
    "http://environment.data.gov.uk/flood-monitoring/id/measures/2200TH-flow--Mean-15_min-m3_s";

/// Default weather report page (University of Reading AWS).
pub const DEFAULT_WEATHER_URL: &str =
    "https://www.met.reading.ac.uk/weatherdata/Reading_AWS_weather_report.html";

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Serve fixed synthetic readings instead of calling the providers.
    pub demo_mode: bool,

    /// River flow measure endpoint.
    pub river_api_url: String,

    /// Weather report page.
    pub weather_url: String,

    /// HTTP listen port.
    pub port: u16,

    /// Minutes a cached reading stays fresh.
    pub cache_expiry_minutes: u32,

    /// Upper bound on a single upstream fetch, in seconds.
    pub fetch_timeout_secs: u32,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `DEMO_MODE` – `true` to use synthetic readings (default: false)
/// - `RIVER_API_URL` – river flow measure endpoint
/// - `WEATHER_URL` – weather report page
/// - `PORT` – listen port (default: 5000)
/// - `CACHE_EXPIRY_MINUTES` – freshness window (default: 15)
/// - `FETCH_TIMEOUT_SECS` – per-fetch timeout (default: 10)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let demo_mode = env::var("DEMO_MODE").map(|v| parse_flag(&v)).unwrap_or(false);
    let river_api_url = env_or!("RIVER_API_URL", DEFAULT_RIVER_API_URL);
    let weather_url = env_or!("WEATHER_URL", DEFAULT_WEATHER_URL);
    let port = parse_env_u32!("PORT", 5000);
    let cache_expiry_minutes = parse_env_u32!("CACHE_EXPIRY_MINUTES", 15);
    let fetch_timeout_secs = parse_env_u32!("FETCH_TIMEOUT_SECS", 10);

    let port = u16::try_from(port).map_err(|_| anyhow!("Invalid PORT: {} is out of range", port))?;
    if cache_expiry_minutes == 0 {
        bail!("Invalid CACHE_EXPIRY_MINUTES: must be at least 1");
    }
    if fetch_timeout_secs == 0 {
        bail!("Invalid FETCH_TIMEOUT_SECS: must be at least 1");
    }

    Ok(Config {
        demo_mode,
        river_api_url,
        weather_url,
        port,
        cache_expiry_minutes,
        fetch_timeout_secs,
    })
}

/// `true`, case-insensitively, turns a flag on. Anything else is off.
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl Default for Config {
    fn default() -> Self {
        // ---
        Self {
            demo_mode: false,
            river_api_url: DEFAULT_RIVER_API_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            port: 5000,
            cache_expiry_minutes: 15,
            fetch_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.cache_expiry_minutes))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.fetch_timeout_secs))
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DEMO_MODE            : {}", self.demo_mode);
        tracing::info!("  RIVER_API_URL        : {}", self.river_api_url);
        tracing::info!("  WEATHER_URL          : {}", self.weather_url);
        tracing::info!("  PORT                 : {}", self.port);
        tracing::info!("  CACHE_EXPIRY_MINUTES : {}", self.cache_expiry_minutes);
        tracing::info!("  FETCH_TIMEOUT_SECS   : {}", self.fetch_timeout_secs);
    }
}
