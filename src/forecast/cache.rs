use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::weather::{ForecastSeries, LocationRecord};

const CACHE_TTL_SECS: i64 = 5 * 60;

/// Coordinates compare equal when they agree to four decimal places.
fn coordinate_key(value: f64) -> i64 {
    (value * 10_000.0).round() as i64
}

#[derive(Debug, Clone)]
pub struct CachedForecast {
    pub series: Arc<ForecastSeries>,
    pub latitude: f64,
    pub longitude: f64,
    pub fetched_at: DateTime<Utc>,
}

impl CachedForecast {
    fn matches(&self, location: &LocationRecord) -> bool {
        coordinate_key(self.latitude) == coordinate_key(location.latitude)
            && coordinate_key(self.longitude) == coordinate_key(location.longitude)
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < Duration::seconds(CACHE_TTL_SECS)
    }
}

/// Last rolling forecast payload and the location it was fetched for.
/// Single-date series never pass through here.
#[derive(Debug, Default)]
pub struct ForecastCache {
    entry: Option<CachedForecast>,
}

impl ForecastCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_valid(&self, location: &LocationRecord, now: DateTime<Utc>) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| entry.matches(location) && entry.is_fresh(now))
    }

    /// The cached series when it is still valid for `location`.
    #[must_use]
    pub fn series(&self, location: &LocationRecord, now: DateTime<Utc>) -> Option<Arc<ForecastSeries>> {
        if !self.is_valid(location, now) {
            return None;
        }
        self.entry.as_ref().map(|entry| Arc::clone(&entry.series))
    }

    pub fn store(&mut self, series: Arc<ForecastSeries>, location: &LocationRecord, now: DateTime<Utc>) {
        self.entry = Some(CachedForecast {
            series,
            latitude: location.latitude,
            longitude: location.longitude,
            fetched_at: now,
        });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[must_use]
    pub fn entry(&self) -> Option<&CachedForecast> {
        self.entry.as_ref()
    }
}
