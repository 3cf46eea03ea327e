//! Freshness cache for the river and weather readings.
//!
//! Each reading kind lives in its own [`CacheEntry`] behind its own lock.
//! A request refreshes an entry only when it is expired; a successful fetch
//! replaces the value and the fetch time together, a failed fetch leaves the
//! entry untouched so the next request tries again straight away.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::models::{RiverReading, WeatherReading};
use crate::sources::{FetchError, ReadingSource};

// ---

/// Last successful reading of one kind and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    // ---
    value: Option<T>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            value: None,
            fetched_at: None,
        }
    }
}

impl<T> CacheEntry<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// True if never fetched, or fetched more than `window` before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        // ---
        match self.fetched_at {
            None => true,
            Some(fetched_at) => now - fetched_at > window,
        }
    }

    /// Whole seconds since the last successful fetch.
    pub fn age_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        self.fetched_at.map(|t| (now - t).num_seconds())
    }

    #[cfg(test)]
    pub(crate) fn filled(value: T, fetched_at: DateTime<Utc>) -> Self {
        Self {
            value: Some(value),
            fetched_at: Some(fetched_at),
        }
    }

    fn store(&mut self, value: T, now: DateTime<Utc>) {
        // ---
        self.value = Some(value);
        self.fetched_at = Some(now);
    }
}

/// One cache entry paired with the source that fills it.
struct Slot<T> {
    // ---
    entry: Mutex<CacheEntry<T>>,
    source: Arc<dyn ReadingSource<T>>,
}

impl<T: Clone + Send + 'static> Slot<T> {
    fn new(source: Arc<dyn ReadingSource<T>>) -> Self {
        Self {
            entry: Mutex::new(CacheEntry::default()),
            source,
        }
    }

    /// Refresh if expired. The lock is held across the fetch so concurrent
    /// callers never fetch the same entry twice. `clock` is read after the
    /// lock is taken for the expiry check, and again after a successful fetch
    /// for the stored fetch time.
    async fn ensure_fresh<C>(&self, clock: &C, window: chrono::Duration, timeout: Duration)
    where
        C: Fn() -> DateTime<Utc> + Sync,
    {
        // ---
        let mut entry = self.entry.lock().await;
        if !entry.is_expired(clock(), window) {
            tracing::debug!("{} cache fresh, skipping fetch", self.source.name());
            return;
        }

        let outcome = match tokio::time::timeout(timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        };

        match outcome {
            Ok(value) => {
                let fetched_at = clock();
                entry.store(value, fetched_at);
                tracing::debug!("{} cache refreshed at {}", self.source.name(), fetched_at);
            }
            Err(e) => {
                tracing::warn!(
                    "Error fetching {} data: {} (serving cached value: {})",
                    self.source.name(),
                    e,
                    entry.value().is_some()
                );
            }
        }
    }

    async fn snapshot(&self) -> CacheEntry<T> {
        self.entry.lock().await.clone()
    }
}

/// Copy of both entries taken at one point in time.
#[derive(Debug, Clone)]
pub struct ReadingsSnapshot {
    // ---
    pub river: CacheEntry<RiverReading>,
    pub weather: CacheEntry<WeatherReading>,
}

/// Process-lifetime cache of the latest river and weather readings.
///
/// Created once at startup and shared with the HTTP handlers through an
/// `Arc`.
pub struct FreshnessCache {
    // ---
    river: Slot<RiverReading>,
    weather: Slot<WeatherReading>,
    window: chrono::Duration,
    fetch_timeout: Duration,
}

impl FreshnessCache {
    pub fn new(
        river_source: Arc<dyn ReadingSource<RiverReading>>,
        weather_source: Arc<dyn ReadingSource<WeatherReading>>,
        window: chrono::Duration,
        fetch_timeout: Duration,
    ) -> Self {
        // ---
        Self {
            river: Slot::new(river_source),
            weather: Slot::new(weather_source),
            window,
            fetch_timeout,
        }
    }

    /// Refresh any expired entry from its source, stamping fetch times with
    /// the wall clock at the end of each fetch.
    pub async fn ensure_fresh(&self) {
        self.ensure_fresh_with(&Utc::now).await
    }

    /// Refresh any entry expired as of `now`, stamping it with `now`.
    pub async fn ensure_fresh_at(&self, now: DateTime<Utc>) {
        self.ensure_fresh_with(&move || now).await
    }

    /// River and weather refresh concurrently and independently.
    async fn ensure_fresh_with<C>(&self, clock: &C)
    where
        C: Fn() -> DateTime<Utc> + Sync,
    {
        // ---
        tokio::join!(
            self.river.ensure_fresh(clock, self.window, self.fetch_timeout),
            self.weather.ensure_fresh(clock, self.window, self.fetch_timeout),
        );
    }

    pub async fn snapshot(&self) -> ReadingsSnapshot {
        // ---
        let river = self.river.entry.lock().await;
        let weather = self.weather.entry.lock().await;
        ReadingsSnapshot {
            river: river.clone(),
            weather: weather.clone(),
        }
    }

    pub async fn river(&self) -> CacheEntry<RiverReading> {
        self.river.snapshot().await
    }

    pub async fn weather(&self) -> CacheEntry<WeatherReading> {
        self.weather.snapshot().await
    }
}
