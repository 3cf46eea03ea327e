//! Environment Agency flood-monitoring client for river flow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{FetchError, ReadingSource};
use crate::models::RiverReading;

// ---

/// Polls a flood-monitoring measure endpoint and takes the first (most
/// recent) element of its `items` list.
pub struct EnvironmentAgencyRiverSource {
    // ---
    client: reqwest::Client,
    url: String,
}

impl EnvironmentAgencyRiverSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReadingSource<RiverReading> for EnvironmentAgencyRiverSource {
    async fn fetch(&self) -> Result<RiverReading, FetchError> {
        // ---
        tracing::info!("Fetching river data from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        let reading = parse_latest_reading(&body)?;

        tracing::info!("Fetched river data: flow={} m³/s", reading.flow);
        Ok(reading)
    }

    fn name(&self) -> &str {
        "river"
    }
}

/// Extract the latest flow value and timestamp from a measure response.
pub(crate) fn parse_latest_reading(body: &serde_json::Value) -> Result<RiverReading, FetchError> {
    // ---
    let items = body
        .get("items")
        .and_then(|items| items.as_array())
        .ok_or(FetchError::MissingField("items"))?;

    let latest = items.first().ok_or(FetchError::Empty)?;
    tracing::debug!("River response has {} items, latest: {}", items.len(), latest);

    let flow = latest
        .get("value")
        .and_then(|v| v.as_f64())
        .ok_or(FetchError::MissingField("value"))?;

    if !flow.is_finite() || flow < 0.0 {
        return Err(FetchError::Parse(format!("flow out of range: {flow}")));
    }

    let observed_at = latest
        .get("dateTime")
        .and_then(|v| v.as_str())
        .ok_or(FetchError::MissingField("dateTime"))?;

    let observed_at = DateTime::parse_from_rfc3339(observed_at)
        .map_err(|e| FetchError::Parse(format!("dateTime '{observed_at}': {e}")))?
        .with_timezone(&Utc);

    Ok(RiverReading { flow, observed_at })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    /// Trimmed measure response: newest item first.
    fn fixture_readings() -> serde_json::Value {
        // ---
        json!({
            "@context": "http://environment.data.gov.uk/flood-monitoring/meta/context.jsonld",
            "meta": { "publisher": "Environment Agency", "limit": 2 },
            "items": [
                {
                    "@id": "http://environment.data.gov.uk/flood-monitoring/data/readings/2200TH-flow--Mean-15_min-m3_s/2025-01-12T09-15-00Z",
                    "dateTime": "2025-01-12T09:15:00Z",
                    "measure": "http://environment.data.gov.uk/flood-monitoring/id/measures/2200TH-flow--Mean-15_min-m3_s",
                    "value": 87.431
                },
                {
                    "dateTime": "2025-01-12T09:00:00Z",
                    "value": 86.9
                }
            ]
        })
    }

    #[test]
    fn test_parse_takes_first_item() {
        // ---
        let reading = assert_ok!(parse_latest_reading(&fixture_readings()));

        assert_eq!(reading.flow, 87.431);
        assert_eq!(
            reading.observed_at,
            Utc.with_ymd_and_hms(2025, 1, 12, 9, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_empty_items() {
        // ---
        let body = json!({ "items": [] });
        assert!(matches!(parse_latest_reading(&body), Err(FetchError::Empty)));
    }

    #[test]
    fn test_parse_missing_items() {
        // ---
        let body = json!({ "meta": {} });
        assert!(matches!(
            parse_latest_reading(&body),
            Err(FetchError::MissingField("items"))
        ));
    }

    #[test]
    fn test_parse_missing_value() {
        // ---
        let body = json!({ "items": [{ "dateTime": "2025-01-12T09:15:00Z" }] });
        assert!(matches!(
            parse_latest_reading(&body),
            Err(FetchError::MissingField("value"))
        ));
    }

    #[test]
    fn test_parse_bad_timestamp() {
        // ---
        let body = json!({ "items": [{ "dateTime": "yesterday", "value": 12.0 }] });
        let err = assert_err!(parse_latest_reading(&body));
        assert!(err.to_string().contains("yesterday"), "unexpected error: {err}");
    }

    #[test]
    fn test_parse_rejects_negative_flow() {
        // ---
        let body = json!({ "items": [{ "dateTime": "2025-01-12T09:15:00Z", "value": -1.0 }] });
        assert!(matches!(parse_latest_reading(&body), Err(FetchError::Parse(_))));
    }
}
