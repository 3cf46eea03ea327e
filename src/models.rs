//! Data models shared by the sources, the cache and the condition engine.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

// ---

/// Latest river discharge reading from the flow-measurement provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverReading {
    // ---
    /// Discharge in m³/s.
    pub flow: f64,
    pub observed_at: DateTime<Utc>,
}

/// Latest weather observation from the weather provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    // ---
    /// Air temperature in °C.
    pub temperature: f64,
    /// 10-metre maximum 3-second gust in m/s.
    pub wind_gust: f64,
    /// Free-text observation time as printed by the provider, if present.
    pub observed_at: Option<String>,
}

/// Per-factor danger level. Declaration order is the severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Green,
    Amber,
    Red,
    Black,
}

/// Overall outcome for one boat category.
///
/// `NoRowing` is stronger than any single [`Severity`]: it is reached by a
/// single Black factor or by two Red factors together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Level(Severity),
    NoRowing,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        // ---
        match self {
            Verdict::Level(Severity::Green) => "Green",
            Verdict::Level(Severity::Amber) => "Amber",
            Verdict::Level(Severity::Red) => "Red",
            Verdict::Level(Severity::Black) => "Black",
            Verdict::NoRowing => "NO ROWING",
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Crew configuration. Each variant has its own threshold tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BoatCategory {
    #[serde(rename = "Fours, Quads, Eights")]
    HeavyCrew,
    #[serde(rename = "Singles, Doubles, Pairs")]
    LightCrew,
}

impl BoatCategory {
    pub const ALL: [BoatCategory; 2] = [BoatCategory::HeavyCrew, BoatCategory::LightCrew];

    pub fn label(&self) -> &'static str {
        // ---
        match self {
            BoatCategory::HeavyCrew => "Fours, Quads, Eights",
            BoatCategory::LightCrew => "Singles, Doubles, Pairs",
        }
    }
}

/// Evaluated conditions for one boat category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionResult {
    // ---
    pub overall: Verdict,
    pub river: Severity,
    pub wind: Severity,
    pub temperature: Severity,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_severity_order() {
        // ---
        assert!(Severity::Green < Severity::Amber);
        assert!(Severity::Amber < Severity::Red);
        assert!(Severity::Red < Severity::Black);
    }

    #[test]
    fn test_verdict_serializes_as_label() {
        // ---
        let json = serde_json::to_string(&Verdict::NoRowing).unwrap();
        assert_eq!(json, "\"NO ROWING\"");

        let json = serde_json::to_string(&Verdict::Level(Severity::Amber)).unwrap();
        assert_eq!(json, "\"Amber\"");
    }

    #[test]
    fn test_category_labels_match_serialized_names() {
        // ---
        for category in BoatCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }
}
