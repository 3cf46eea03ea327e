//! University of Reading automatic weather station report scraper.
//!
//! The report is an HTML page of labelled values. Comments, scripts and
//! styles are dropped, the rest is flattened to text with entities decoded,
//! and the two numeric fields are pulled out by pattern. The observation
//! time is the text of the first paragraph that announces it.

use async_trait::async_trait;
use regex::Regex;

use super::{FetchError, ReadingSource};
use crate::models::WeatherReading;

// ---

/// Compiled patterns for the weather report page.
#[derive(Debug, Clone)]
pub struct WeatherPageParser {
    // ---
    tags: Regex,
    comments: Regex,
    hidden_blocks: Regex,
    paragraphs: Regex,
    whitespace: Regex,
    temperature: Regex,
    wind_gust: Regex,
}

impl WeatherPageParser {
    pub fn new() -> Result<Self, regex::Error> {
        // ---
        Ok(Self {
            tags: Regex::new(r"<[^>]*>")?,
            comments: Regex::new(r"(?s)<!--.*?-->")?,
            hidden_blocks: Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>")?,
            paragraphs: Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>")?,
            whitespace: Regex::new(r"\s+")?,
            temperature: Regex::new(r"Air temperature:\s*([-+]?\d+\.?\d*)\s*(?:[º°]C|℃)")?,
            wind_gust: Regex::new(r"10-metre maximum 3-sec wind gust:\s*([-+]?\d+\.?\d*)\s*m/s")?,
        })
    }

    /// Parse a report page into a reading.
    ///
    /// Fails if either the temperature or the wind gust is missing.
    pub fn parse(&self, html: &str) -> Result<WeatherReading, FetchError> {
        // ---
        let markup = self.visible_markup(html);
        let text = self.page_text(&markup);

        let temperature = capture_number(&self.temperature, &text);
        let wind_gust = capture_number(&self.wind_gust, &text);

        let (Some(temperature), Some(wind_gust)) = (temperature, wind_gust) else {
            tracing::warn!(
                "Failed to parse weather data. Temp: {:?}, Wind: {:?}",
                temperature,
                wind_gust
            );
            return Err(match temperature {
                None => FetchError::MissingField("air temperature"),
                Some(_) => FetchError::MissingField("wind gust"),
            });
        };

        if wind_gust < 0.0 {
            return Err(FetchError::Parse(format!("negative wind gust: {wind_gust}")));
        }

        Ok(WeatherReading {
            temperature,
            wind_gust,
            observed_at: self.observation_time(&markup),
        })
    }

    /// First paragraph mentioning the observation time, as display text.
    fn observation_time(&self, html: &str) -> Option<String> {
        // ---
        self.paragraphs
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|inner| self.inline_text(inner.as_str()))
            .find(|text| {
                text.contains("Observation time:")
                    || text.to_lowercase().contains("latest observations")
            })
    }

    /// Markup with comments, scripts and styles removed.
    fn visible_markup(&self, html: &str) -> String {
        // ---
        let uncommented = self.comments.replace_all(html, "");
        self.hidden_blocks.replace_all(&uncommented, "").into_owned()
    }

    fn page_text(&self, markup: &str) -> String {
        decode_entities(&self.tags.replace_all(markup, ""))
    }

    fn inline_text(&self, fragment: &str) -> String {
        // ---
        let text = decode_entities(&self.tags.replace_all(fragment, ""));
        self.whitespace.replace_all(text.trim(), " ").into_owned()
    }
}

fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Live weather source backed by the report page.
pub struct ReadingWeatherSource {
    // ---
    client: reqwest::Client,
    url: String,
    parser: WeatherPageParser,
}

impl ReadingWeatherSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            client,
            url: url.into(),
            parser: WeatherPageParser::new()?,
        })
    }
}

#[async_trait]
impl ReadingSource<WeatherReading> for ReadingWeatherSource {
    async fn fetch(&self) -> Result<WeatherReading, FetchError> {
        // ---
        tracing::info!("Fetching weather data from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let html = response.text().await?;
        let reading = self.parser.parse(&html)?;

        tracing::info!(
            "Fetched weather data: temp={}°C, wind={} m/s",
            reading.temperature,
            reading.wind_gust
        );
        Ok(reading)
    }

    fn name(&self) -> &str {
        "weather"
    }
}
