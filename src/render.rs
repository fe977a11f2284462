//! View models derived from the store and the selection pointer.
//!
//! Nothing here mutates state; a coordinator is built per frame from
//! borrowed parts and thrown away.

mod current;
mod daily;
mod hourly;
mod insights;
mod sky;
mod time_label;

use chrono::NaiveDateTime;

pub use current::{CurrentView, TemperatureExtreme};
pub use daily::DailyCard;
pub use hourly::HourlyCard;
pub use insights::{Insight, InsightKind};
pub use sky::{SkyBackground, SkyView, TemperatureBand, WindStreaks};
pub use time_label::SelectedTimeLabel;

use crate::{
    domain::weather::{Conditions, Units},
    forecast::{ForecastStore, SelectionController},
};

/// Everything one frame needs.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub current: CurrentView,
    pub hourly: Vec<HourlyCard>,
    pub daily: Vec<DailyCard>,
    pub insights: Vec<Insight>,
    pub sky: SkyView,
    pub selected_time: SelectedTimeLabel,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderCoordinator<'a> {
    store: &'a ForecastStore,
    selection: &'a SelectionController,
    units: Units,
    now: NaiveDateTime,
}

impl<'a> RenderCoordinator<'a> {
    /// `now` is the location-local wall clock.
    #[must_use]
    pub fn new(
        store: &'a ForecastStore,
        selection: &'a SelectionController,
        units: Units,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            store,
            selection,
            units,
            now,
        }
    }

    /// Reading at the selected hour, each missing field taken from the
    /// current block.
    #[must_use]
    pub fn selected_conditions(&self) -> Conditions {
        let len = self.store.hourly_len();
        let row = if len == 0 {
            Conditions::UNKNOWN
        } else {
            self.store
                .hourly_row(self.selection.hour_index().min(len - 1))
        };
        row.or(self.store.current_snapshot())
    }

    #[must_use]
    pub fn current_conditions(&self) -> CurrentView {
        current::build(self)
    }

    #[must_use]
    pub fn hourly_strip(&self) -> Vec<HourlyCard> {
        hourly::build(self)
    }

    #[must_use]
    pub fn daily_strip(&self) -> Vec<DailyCard> {
        daily::build(self)
    }

    #[must_use]
    pub fn insights(&self) -> Vec<Insight> {
        insights::build(self)
    }

    #[must_use]
    pub fn sky(&self) -> SkyView {
        sky::build(self)
    }

    #[must_use]
    pub fn selected_time(&self) -> SelectedTimeLabel {
        time_label::build(self)
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        DashboardView {
            current: self.current_conditions(),
            hourly: self.hourly_strip(),
            daily: self.daily_strip(),
            insights: self.insights(),
            sky: self.sky(),
            selected_time: self.selected_time(),
        }
    }
}
