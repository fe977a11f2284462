use chrono::NaiveDate;

use super::RenderCoordinator;
use crate::domain::weather::{
    WeatherCondition, condition_for, format_temperature, is_tomorrow, uv_level, weekday_label,
};

const STRIP_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyCard {
    pub index: usize,
    pub date: NaiveDate,
    pub label: String,
    pub selected: bool,
    pub condition: &'static WeatherCondition,
    pub high: String,
    pub low: String,
    /// Rounded precipitation total, present only when above zero.
    pub rain_mm: Option<i32>,
    pub uv_max: i32,
    pub uv_level: &'static str,
}

fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if is_tomorrow(date, today) {
        "Tomorrow".to_string()
    } else {
        weekday_label(date)
    }
}

pub(super) fn build(view: &RenderCoordinator<'_>) -> Vec<DailyCard> {
    let today = view.now.date();
    view.store
        .daily()
        .iter()
        .take(STRIP_DAYS)
        .enumerate()
        .map(|(index, day)| {
            let uv_max = day.uv_index_max.unwrap_or(0.0).round() as i32;
            let rain = day.precipitation_sum_mm.unwrap_or(0.0).round() as i32;
            DailyCard {
                index,
                date: day.date,
                label: day_label(day.date, today),
                selected: index == view.selection.day_index(),
                condition: condition_for(day.weather_code.unwrap_or(0)),
                high: format_temperature(day.temperature_max_c, view.units),
                low: format_temperature(day.temperature_min_c, view.units),
                rain_mm: (rain > 0).then_some(rain),
                uv_max,
                uv_level: uv_level(uv_max),
            }
        })
        .collect()
}
