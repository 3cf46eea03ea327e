//! Fixed synthetic sources for offline runs (`DEMO_MODE=true`).

use async_trait::async_trait;
use chrono::Utc;

use super::{FetchError, ReadingSource};
use crate::models::{RiverReading, WeatherReading};

// ---

pub const DEMO_FLOW: f64 = 45.5;
pub const DEMO_TEMPERATURE: f64 = 8.2;
pub const DEMO_WIND_GUST: f64 = 7.3;

pub struct DemoRiverSource;

#[async_trait]
impl ReadingSource<RiverReading> for DemoRiverSource {
    async fn fetch(&self) -> Result<RiverReading, FetchError> {
        // ---
        tracing::info!("DEMO MODE: Using demo river data");
        Ok(RiverReading {
            flow: DEMO_FLOW,
            observed_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "river (demo)"
    }
}

pub struct DemoWeatherSource;

#[async_trait]
impl ReadingSource<WeatherReading> for DemoWeatherSource {
    async fn fetch(&self) -> Result<WeatherReading, FetchError> {
        // ---
        tracing::info!("DEMO MODE: Using demo weather data");
        Ok(WeatherReading {
            temperature: DEMO_TEMPERATURE,
            wind_gust: DEMO_WIND_GUST,
            observed_at: Some(format!(
                "Latest observations at {}",
                Utc::now().format("%H:%M")
            )),
        })
    }

    fn name(&self) -> &str {
        "weather (demo)"
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[tokio::test]
    async fn test_demo_sources_return_fixed_values() {
        // ---
        let river = DemoRiverSource.fetch().await.unwrap();
        assert_eq!(river.flow, 45.5);

        let weather = DemoWeatherSource.fetch().await.unwrap();
        assert_eq!(weather.temperature, 8.2);
        assert_eq!(weather.wind_gust, 7.3);
        assert!(weather
            .observed_at
            .as_deref()
            .is_some_and(|s| s.starts_with("Latest observations at ")));
    }
}
