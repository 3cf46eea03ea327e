//! Condition engine: maps river and weather measurements to per-factor
//! severities for each boat category and folds them into an overall verdict.
//!
//! Every function here is pure and total. Cut points are inclusive and are
//! checked from the most severe level down.

use std::collections::BTreeMap;

use crate::models::{
    BoatCategory, ConditionResult, RiverReading, Severity, Verdict, WeatherReading,
};

// ---

/// Which way a measurement becomes dangerous.
#[derive(Debug, Clone, Copy)]
enum Worsens {
    /// Higher is worse (flow, wind).
    Rising,
    /// Lower is worse (temperature).
    Falling,
}

/// Three cut points for one measurement and one boat category.
#[derive(Debug, Clone, Copy)]
struct Thresholds {
    // ---
    black: f64,
    red: f64,
    amber: f64,
    worsens: Worsens,
}

impl Thresholds {
    const fn rising(black: f64, red: f64, amber: f64) -> Self {
        Self {
            black,
            red,
            amber,
            worsens: Worsens::Rising,
        }
    }

    const fn falling(black: f64, red: f64, amber: f64) -> Self {
        Self {
            black,
            red,
            amber,
            worsens: Worsens::Falling,
        }
    }

    fn classify(&self, value: f64) -> Severity {
        // ---
        let reached = |limit: f64| match self.worsens {
            Worsens::Rising => value >= limit,
            Worsens::Falling => value <= limit,
        };

        if reached(self.black) {
            Severity::Black
        } else if reached(self.red) {
            Severity::Red
        } else if reached(self.amber) {
            Severity::Amber
        } else {
            Severity::Green
        }
    }
}

fn flow_thresholds(category: BoatCategory) -> Thresholds {
    // ---
    match category {
        BoatCategory::HeavyCrew => Thresholds::rising(120.0, 100.0, 75.0),
        BoatCategory::LightCrew => Thresholds::rising(100.0, 75.0, 50.0),
    }
}

fn wind_thresholds(category: BoatCategory) -> Thresholds {
    // ---
    match category {
        BoatCategory::HeavyCrew => Thresholds::rising(15.6, 13.6, 11.3),
        BoatCategory::LightCrew => Thresholds::rising(13.6, 11.3, 9.0),
    }
}

fn temperature_thresholds(category: BoatCategory) -> Thresholds {
    // ---
    match category {
        BoatCategory::HeavyCrew => Thresholds::falling(-3.0, 2.9, 6.9),
        BoatCategory::LightCrew => Thresholds::falling(0.0, 4.9, 8.9),
    }
}

/// Severity of a river flow (m³/s) for the given category.
pub fn river_severity(flow: f64, category: BoatCategory) -> Severity {
    flow_thresholds(category).classify(flow)
}

/// Severity of a wind gust (m/s) for the given category.
pub fn wind_severity(gust: f64, category: BoatCategory) -> Severity {
    wind_thresholds(category).classify(gust)
}

/// Severity of an air temperature (°C) for the given category. Cold worsens.
pub fn temperature_severity(temperature: f64, category: BoatCategory) -> Severity {
    temperature_thresholds(category).classify(temperature)
}

/// Combine the three factor severities into one verdict.
///
/// Any Black, or two or more Reds, is `NoRowing`. Otherwise the most severe
/// factor wins.
pub fn aggregate(river: Severity, wind: Severity, temperature: Severity) -> Verdict {
    // ---
    let factors = [river, wind, temperature];
    let black_count = factors.iter().filter(|s| **s == Severity::Black).count();
    let red_count = factors.iter().filter(|s| **s == Severity::Red).count();

    if black_count >= 1 || red_count >= 2 {
        return Verdict::NoRowing;
    }

    let worst = factors.into_iter().max().unwrap_or(Severity::Green);
    Verdict::Level(worst)
}

/// Evaluate one category against a single snapshot of readings.
pub fn evaluate_category(
    river: &RiverReading,
    weather: &WeatherReading,
    category: BoatCategory,
) -> ConditionResult {
    // ---
    let river_sev = river_severity(river.flow, category);
    let wind_sev = wind_severity(weather.wind_gust, category);
    let temp_sev = temperature_severity(weather.temperature, category);

    ConditionResult {
        overall: aggregate(river_sev, wind_sev, temp_sev),
        river: river_sev,
        wind: wind_sev,
        temperature: temp_sev,
    }
}

/// Evaluate every boat category against the same snapshot of readings.
pub fn evaluate(
    river: &RiverReading,
    weather: &WeatherReading,
) -> BTreeMap<BoatCategory, ConditionResult> {
    // ---
    BoatCategory::ALL
        .into_iter()
        .map(|category| (category, evaluate_category(river, weather, category)))
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::models::BoatCategory::{HeavyCrew, LightCrew};
    use crate::models::Severity::{Amber, Black, Green, Red};

    fn river(flow: f64) -> RiverReading {
        // ---
        RiverReading {
            flow,
            observed_at: Utc.with_ymd_and_hms(2025, 1, 12, 9, 15, 0).unwrap(),
        }
    }

    fn weather(temperature: f64, wind_gust: f64) -> WeatherReading {
        // ---
        WeatherReading {
            temperature,
            wind_gust,
            observed_at: Some("Latest observations at 09:10".to_string()),
        }
    }

    #[test]
    fn test_river_table() {
        // ---
        assert_eq!(river_severity(120.0, HeavyCrew), Black);
        assert_eq!(river_severity(119.999, HeavyCrew), Red);
        assert_eq!(river_severity(100.0, HeavyCrew), Red);
        assert_eq!(river_severity(75.0, HeavyCrew), Amber);
        assert_eq!(river_severity(74.9, HeavyCrew), Green);

        assert_eq!(river_severity(100.0, LightCrew), Black);
        assert_eq!(river_severity(75.0, LightCrew), Red);
        assert_eq!(river_severity(50.0, LightCrew), Amber);
        assert_eq!(river_severity(49.9, LightCrew), Green);
        assert_eq!(river_severity(0.0, LightCrew), Green);
    }

    #[test]
    fn test_wind_table() {
        // ---
        assert_eq!(wind_severity(15.6, HeavyCrew), Black);
        assert_eq!(wind_severity(13.6, HeavyCrew), Red);
        assert_eq!(wind_severity(11.3, HeavyCrew), Amber);
        assert_eq!(wind_severity(11.29, HeavyCrew), Green);

        assert_eq!(wind_severity(13.6, LightCrew), Black);
        assert_eq!(wind_severity(11.3, LightCrew), Red);
        assert_eq!(wind_severity(9.0, LightCrew), Amber);
        assert_eq!(wind_severity(8.999, LightCrew), Green);
    }

    #[test]
    fn test_temperature_table() {
        // ---
        assert_eq!(temperature_severity(-3.0, HeavyCrew), Black);
        assert_eq!(temperature_severity(-2.9, HeavyCrew), Red);
        assert_eq!(temperature_severity(2.9, HeavyCrew), Red);
        assert_eq!(temperature_severity(6.9, HeavyCrew), Amber);
        assert_eq!(temperature_severity(7.0, HeavyCrew), Green);

        assert_eq!(temperature_severity(0.0, LightCrew), Black);
        assert_eq!(temperature_severity(0.001, LightCrew), Red);
        assert_eq!(temperature_severity(4.9, LightCrew), Red);
        assert_eq!(temperature_severity(8.9, LightCrew), Amber);
        assert_eq!(temperature_severity(30.0, LightCrew), Green);
    }

    #[test]
    fn test_river_severity_is_monotonic_in_flow() {
        // ---
        for category in BoatCategory::ALL {
            let mut previous = Green;
            for step in 0..=3000 {
                let flow = step as f64 * 0.05;
                let current = river_severity(flow, category);
                assert!(current >= previous, "{category:?}: dropped at flow {flow}");
                previous = current;
            }
            assert_eq!(previous, Black);
        }
    }

    #[test]
    fn test_wind_severity_is_monotonic_in_gust() {
        // ---
        for category in BoatCategory::ALL {
            let mut previous = Green;
            for step in 0..=400 {
                let gust = step as f64 * 0.05;
                let current = wind_severity(gust, category);
                assert!(current >= previous, "{category:?}: dropped at gust {gust}");
                previous = current;
            }
        }
    }

    #[test]
    fn test_temperature_severity_is_monotonic_in_temperature() {
        // ---
        for category in BoatCategory::ALL {
            let mut previous = Black;
            for step in -200..=300 {
                let temperature = step as f64 * 0.05;
                let current = temperature_severity(temperature, category);
                assert!(
                    current <= previous,
                    "{category:?}: worsened at temperature {temperature}"
                );
                previous = current;
            }
            assert_eq!(previous, Green);
        }
    }

    #[test]
    fn test_aggregate_compounding_rules() {
        // ---
        assert_eq!(aggregate(Red, Red, Green), Verdict::NoRowing);
        assert_eq!(aggregate(Green, Red, Red), Verdict::NoRowing);
        assert_eq!(aggregate(Black, Green, Green), Verdict::NoRowing);
        assert_eq!(aggregate(Green, Green, Black), Verdict::NoRowing);
        assert_eq!(aggregate(Red, Amber, Green), Verdict::Level(Red));
        assert_eq!(aggregate(Amber, Amber, Amber), Verdict::Level(Amber));
        assert_eq!(aggregate(Green, Green, Green), Verdict::Level(Green));
    }

    #[test]
    fn test_overall_derived_from_factors() {
        // ---
        let result = evaluate_category(&river(80.0), &weather(5.0, 12.0), HeavyCrew);
        assert_eq!(result.overall, aggregate(result.river, result.wind, result.temperature));
    }

    #[test]
    fn test_evaluate_heavy_crew_all_amber() {
        // ---
        let results = evaluate(&river(80.0), &weather(5.0, 12.0));
        let heavy = results[&HeavyCrew];

        assert_eq!(heavy.river, Amber);
        assert_eq!(heavy.temperature, Amber);
        assert_eq!(heavy.wind, Amber);
        assert_eq!(heavy.overall, Verdict::Level(Amber));
    }

    #[test]
    fn test_evaluate_covers_both_categories_from_one_snapshot() {
        // ---
        let results = evaluate(&river(80.0), &weather(5.0, 12.0));
        assert_eq!(results.len(), 2);

        // Same inputs, stricter table: Red flow, Red wind, Amber temperature.
        let light = results[&LightCrew];
        assert_eq!(light.river, Red);
        assert_eq!(light.wind, Red);
        assert_eq!(light.temperature, Amber);
        assert_eq!(light.overall, Verdict::NoRowing);
    }

    #[test]
    fn test_demo_readings_evaluate() {
        // ---
        let results = evaluate(&river(45.5), &weather(8.2, 7.3));
        assert_eq!(results[&HeavyCrew].overall, Verdict::Level(Green));
        assert_eq!(results[&LightCrew].overall, Verdict::Level(Amber));
    }
}
