use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use super::ForecastStore;

/// Whether the pointer follows the clock or is frozen on a chosen day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Live,
    Pinned {
        date: NaiveDate,
    },
}

/// Owns the selected (day, hour) pointer into the store.
///
/// Every operation is a no-op while the relevant series is empty, and out of
/// range indices are clamped or wrapped instead of rejected.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Selection,
    day_index: usize,
    hour_index: usize,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.selection == Selection::Live
    }

    #[must_use]
    pub fn pinned_date(&self) -> Option<NaiveDate> {
        match self.selection {
            Selection::Live => None,
            Selection::Pinned { date } => Some(date),
        }
    }

    #[must_use]
    pub fn day_index(&self) -> usize {
        self.day_index
    }

    #[must_use]
    pub fn hour_index(&self) -> usize {
        self.hour_index
    }

    pub fn go_to_now(&mut self, store: &ForecastStore, now: NaiveDateTime) {
        if !store.is_loaded() {
            return;
        }
        self.selection = Selection::Live;
        self.hour_index = store.hour_index_for_instant(now);
        self.day_index = 0;
        debug!(hour = self.hour_index, "selection follows the clock");
    }

    pub fn select_hour(&mut self, store: &ForecastStore, index: usize) {
        let len = store.hourly_len();
        if len == 0 {
            return;
        }
        let index = index.min(len - 1);
        let Some(time) = store.hourly_time(index) else {
            return;
        };
        let date = time.date();
        self.hour_index = index;
        self.selection = Selection::Pinned { date };
        // A day missing from the daily series keeps the previous day index.
        if let Some(day) = store.find_day(date) {
            self.day_index = day;
        }
        debug!(hour = index, day = self.day_index, %date, "hour selected");
    }

    pub fn select_day(&mut self, store: &ForecastStore, index: usize) {
        let len = store.daily_len();
        if len == 0 {
            return;
        }
        let index = index.min(len - 1);
        let Some(date) = store.daily_row(index).map(|row| row.date) else {
            return;
        };
        self.day_index = index;
        self.selection = Selection::Pinned { date };
        if let Some(hour) = store.noon_hour_on(date).or_else(|| store.first_hour_on(date)) {
            self.hour_index = hour;
        }
        debug!(day = index, hour = self.hour_index, %date, "day selected");
    }

    pub fn navigate_hour(&mut self, store: &ForecastStore, delta: isize) {
        if let Some(index) = wrap(self.hour_index, delta, store.hourly_len()) {
            self.select_hour(store, index);
        }
    }

    pub fn navigate_day(&mut self, store: &ForecastStore, delta: isize) {
        if let Some(index) = wrap(self.day_index, delta, store.daily_len()) {
            self.select_day(store, index);
        }
    }

    /// Anchors on the first day of a freshly loaded single-date series, at
    /// its 12:00 row when present.
    pub fn apply_date_jump(&mut self, store: &ForecastStore) {
        let Some(date) = store.daily_row(0).map(|row| row.date) else {
            return;
        };
        self.selection = Selection::Pinned { date };
        self.day_index = 0;
        self.hour_index = store.noon_hour_on(date).unwrap_or(0);
        debug!(%date, hour = self.hour_index, "jumped to date");
    }

    /// Returns true when the live pointer moved.
    pub fn on_periodic_tick(&mut self, store: &ForecastStore, now: NaiveDateTime) -> bool {
        if !self.is_live() || !store.is_loaded() {
            return false;
        }
        let hour = store.hour_index_for_instant(now);
        let moved = hour != self.hour_index;
        self.hour_index = hour;
        moved
    }

    /// Brings the pointer back inside a replaced series.
    ///
    /// A pinned date that still has hourly rows keeps its day. Otherwise the
    /// pin moves to the date of the clamped hour, so the selected hour always
    /// falls on the pinned date.
    pub fn reconcile(&mut self, store: &ForecastStore) {
        self.hour_index = self.hour_index.min(store.hourly_len().saturating_sub(1));
        self.day_index = self.day_index.min(store.daily_len().saturating_sub(1));

        let Selection::Pinned { date } = self.selection else {
            return;
        };
        let on_date = store
            .hourly_time(self.hour_index)
            .is_some_and(|time| time.date() == date);
        if on_date {
            return;
        }
        match (store.find_day(date), store.first_hour_on(date)) {
            (Some(day), Some(_)) => self.select_day(store, day),
            (None, Some(hour)) => self.hour_index = hour,
            _ => self.select_hour(store, self.hour_index),
        }
        debug!(hour = self.hour_index, day = self.day_index, "selection reconciled");
    }
}

fn wrap(current: usize, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    Some((current as isize + delta).rem_euclid(len) as usize)
}
