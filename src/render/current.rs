use super::RenderCoordinator;
use crate::{
    cli::IconMode,
    domain::weather::{WeatherCondition, condition_for, format_temperature, round_temp},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureExtreme {
    High,
    Low,
}

impl TemperatureExtreme {
    #[must_use]
    pub fn marker(self, mode: IconMode) -> &'static str {
        match (self, mode) {
            (Self::High, IconMode::Emoji) => "🔥",
            (Self::Low, IconMode::Emoji) => "❄️",
            (Self::High, IconMode::Ascii) => "^",
            (Self::Low, IconMode::Ascii) => "v",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Day's High",
            Self::Low => "Day's Low",
        }
    }

    /// High wins when the rounded value matches both ends.
    pub(super) fn classify(value: Option<f32>, high: Option<f32>, low: Option<f32>) -> Option<Self> {
        let value = round_temp(value?);
        if high.is_some_and(|high| round_temp(high) == value) {
            Some(Self::High)
        } else if low.is_some_and(|low| round_temp(low) == value) {
            Some(Self::Low)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub condition: &'static WeatherCondition,
    pub temperature: String,
    pub feels_like: String,
    pub extreme: Option<TemperatureExtreme>,
    pub humidity_pct: i32,
    pub wind_kmh: i32,
    pub wind_direction_deg: Option<f32>,
    pub pressure_hpa: i32,
    pub visibility_km: i32,
    pub uv_index: i32,
    pub cloud_cover_pct: i32,
}

fn rounded(value: Option<f32>) -> i32 {
    value.unwrap_or(0.0).round() as i32
}

pub(super) fn build(view: &RenderCoordinator<'_>) -> CurrentView {
    let selected = view.selected_conditions();
    let day = view.store.daily_row(view.selection.day_index());

    let extreme = day.and_then(|day| {
        TemperatureExtreme::classify(
            selected.temperature_2m_c,
            day.temperature_max_c,
            day.temperature_min_c,
        )
    });

    CurrentView {
        condition: condition_for(selected.weather_code.unwrap_or(0)),
        temperature: format_temperature(selected.temperature_2m_c, view.units),
        feels_like: format_temperature(selected.apparent_temperature_c, view.units),
        extreme,
        humidity_pct: rounded(selected.relative_humidity_2m),
        wind_kmh: rounded(selected.wind_speed_10m),
        wind_direction_deg: selected.wind_direction_10m,
        pressure_hpa: rounded(selected.pressure_msl_hpa),
        visibility_km: rounded(selected.visibility_m.map(|m| m / 1000.0)),
        uv_index: rounded(selected.uv_index),
        cloud_cover_pct: rounded(selected.cloud_cover),
    }
}
