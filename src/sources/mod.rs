//! Upstream reading sources.
//!
//! Each source yields the latest typed reading or a [`FetchError`]. Nothing
//! outside this module sees raw JSON or HTML. Failures are ordinary outcomes:
//! the cache logs them and keeps serving what it already has.

use async_trait::async_trait;

mod demo;
mod river;
mod weather;

pub use demo::{DemoRiverSource, DemoWeatherSource};
pub use river::EnvironmentAgencyRiverSource;
pub use weather::ReadingWeatherSource;

// ---

/// Why a fetch produced no reading.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("fetch timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("unparseable payload: {0}")]
    Parse(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("no readings in response")]
    Empty,
}

/// A provider of the latest reading of one kind.
#[async_trait]
pub trait ReadingSource<T>: Send + Sync {
    /// Fetch the most recent reading.
    async fn fetch(&self) -> Result<T, FetchError>;

    /// Short name used in log lines.
    fn name(&self) -> &str;
}

/// Build a shared HTTP client for the live sources.
pub fn http_client(timeout: std::time::Duration) -> reqwest::Result<reqwest::Client> {
    // ---
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("rowing-conditions/", env!("CARGO_PKG_VERSION")))
        .build()
}
