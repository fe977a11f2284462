use chrono::NaiveDateTime;

use super::{RenderCoordinator, TemperatureExtreme};
use crate::domain::weather::{
    WeatherCondition, condition_for, format_temperature, same_hour,
};

const STRIP_HOURS: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyCard {
    pub index: usize,
    pub time: NaiveDateTime,
    pub label: String,
    pub is_now: bool,
    pub selected: bool,
    pub condition: &'static WeatherCondition,
    pub temperature: String,
    pub extreme: Option<TemperatureExtreme>,
    pub precipitation_probability: i32,
}

fn window_start(view: &RenderCoordinator<'_>) -> usize {
    match view.selection.pinned_date() {
        Some(date) => view.store.first_hour_on(date).unwrap_or(0),
        None => view.store.hour_index_for_instant(view.now),
    }
}

pub(super) fn build(view: &RenderCoordinator<'_>) -> Vec<HourlyCard> {
    let hourly = view.store.hourly();
    let start = window_start(view).min(hourly.len());
    let end = (start + STRIP_HOURS).min(hourly.len());
    let window = &hourly[start..end];

    let temps = window.iter().filter_map(|row| row.temperature_2m_c);
    let high = temps.clone().reduce(f32::max);
    let low = temps.reduce(f32::min);
    let live = view.selection.is_live();

    window
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let index = start + offset;
            let is_now = live && same_hour(row.time, view.now);
            let label = if is_now {
                format!("Now {}", view.now.format("%-I:%M %p"))
            } else {
                row.time.format("%H:%M").to_string()
            };
            HourlyCard {
                index,
                time: row.time,
                label,
                is_now,
                selected: index == view.selection.hour_index(),
                condition: condition_for(row.weather_code.unwrap_or(0)),
                temperature: format_temperature(row.temperature_2m_c, view.units),
                extreme: TemperatureExtreme::classify(row.temperature_2m_c, high, low),
                precipitation_probability: row.precipitation_probability.unwrap_or(0.0).round()
                    as i32,
            }
        })
        .collect()
}
