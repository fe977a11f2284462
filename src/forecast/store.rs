use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::domain::weather::{
    Conditions, DailyForecast, FetchScope, ForecastSeries, HourlyForecast, same_hour,
};

/// Holds the forecast series of the active location. Every accessor degrades
/// to an empty answer instead of panicking when nothing is loaded or the
/// index is out of range.
#[derive(Debug, Clone, Default)]
pub struct ForecastStore {
    series: Option<Arc<ForecastSeries>>,
}

impl ForecastStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, series: Arc<ForecastSeries>) {
        self.series = Some(series);
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.series.is_some()
    }

    #[must_use]
    pub fn series(&self) -> Option<&Arc<ForecastSeries>> {
        self.series.as_ref()
    }

    #[must_use]
    pub fn scope(&self) -> Option<FetchScope> {
        self.series.as_ref().map(|series| series.scope)
    }

    #[must_use]
    pub fn hourly(&self) -> &[HourlyForecast] {
        self.series.as_deref().map_or(&[], |series| series.hourly.as_slice())
    }

    #[must_use]
    pub fn daily(&self) -> &[DailyForecast] {
        self.series.as_deref().map_or(&[], |series| series.daily.as_slice())
    }

    #[must_use]
    pub fn hourly_len(&self) -> usize {
        self.hourly().len()
    }

    #[must_use]
    pub fn daily_len(&self) -> usize {
        self.daily().len()
    }

    #[must_use]
    pub fn hourly_row(&self, index: usize) -> Conditions {
        self.hourly()
            .get(index)
            .map_or(Conditions::UNKNOWN, HourlyForecast::conditions)
    }

    #[must_use]
    pub fn hourly_time(&self, index: usize) -> Option<NaiveDateTime> {
        self.hourly().get(index).map(|row| row.time)
    }

    #[must_use]
    pub fn daily_row(&self, index: usize) -> Option<&DailyForecast> {
        self.daily().get(index)
    }

    #[must_use]
    pub fn current_snapshot(&self) -> Conditions {
        self.series
            .as_ref()
            .and_then(|series| series.current)
            .unwrap_or(Conditions::UNKNOWN)
    }

    /// First row in the same hour of the same day as `instant`, or 0.
    #[must_use]
    pub fn hour_index_for_instant(&self, instant: NaiveDateTime) -> usize {
        self.hourly()
            .iter()
            .position(|row| same_hour(row.time, instant))
            .unwrap_or(0)
    }

    /// First daily row on `date`, or 0.
    #[must_use]
    pub fn day_index_for_date(&self, date: NaiveDate) -> usize {
        self.find_day(date).unwrap_or(0)
    }

    #[must_use]
    pub fn find_day(&self, date: NaiveDate) -> Option<usize> {
        self.daily().iter().position(|row| row.date == date)
    }

    #[must_use]
    pub fn first_hour_on(&self, date: NaiveDate) -> Option<usize> {
        self.hourly().iter().position(|row| row.date() == date)
    }

    #[must_use]
    pub fn noon_hour_on(&self, date: NaiveDate) -> Option<usize> {
        self.hourly()
            .iter()
            .position(|row| row.date() == date && row.time.hour() == 12)
    }

    /// Wall clock in the location's local time; `None` before any load.
    #[must_use]
    pub fn local_now(&self, now: DateTime<Utc>) -> Option<NaiveDateTime> {
        self.series.as_ref().map(|series| series.local_time(now))
    }
}
