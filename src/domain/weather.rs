use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

mod catalog;
mod conversions;

pub use catalog::{
    BackgroundCategory, EffectTag, SunVisibility, WeatherCondition, condition_for, weather_icon,
};
pub use conversions::{
    convert_temp, format_temperature, parse_date, parse_datetime, round_temp, same_hour, uv_level,
};
pub(crate) use conversions::{is_tomorrow, is_yesterday, weekday_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Celsius,
    Fahrenheit,
}

impl Units {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

/// How the active location was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Gps,
    Ip,
    Search,
    Default,
}

impl Provenance {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Gps => "Exact Location",
            Self::Ip => "IP Location",
            Self::Search => "Search Result",
            Self::Default => "Default Location",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub provenance: Provenance,
    pub accuracy_meters: Option<f64>,
}

impl LocationRecord {
    pub fn new(
        latitude: f64,
        longitude: f64,
        display_name: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name.into(),
            provenance,
            accuracy_meters: None,
        }
    }

    /// Fallback used when neither GPS, IP lookup nor search produced a location.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(22.5744, 88.3629, "Kolkata, West Bengal", Provenance::Default)
    }

    /// `"12.97, 77.59 • ±35m"` style coordinate line.
    #[must_use]
    pub fn details(&self) -> String {
        let coords = format!("{:.2}, {:.2}", self.latitude, self.longitude);
        match self.accuracy_meters {
            Some(acc) => format!("{coords} • ±{}m", acc.round() as i64),
            None => coords,
        }
    }

    #[must_use]
    pub fn short_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map_or(self.display_name.as_str(), str::trim)
    }
}

/// One composite reading. Every field is optional so that a missing hourly
/// value can fall back to the `current` block field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Conditions {
    pub time: Option<NaiveDateTime>,
    pub temperature_2m_c: Option<f32>,
    pub apparent_temperature_c: Option<f32>,
    pub relative_humidity_2m: Option<f32>,
    pub weather_code: Option<u8>,
    pub pressure_msl_hpa: Option<f32>,
    pub wind_speed_10m: Option<f32>,
    pub wind_direction_10m: Option<f32>,
    pub visibility_m: Option<f32>,
    pub uv_index: Option<f32>,
    pub cloud_cover: Option<f32>,
    pub precipitation_probability: Option<f32>,
    pub is_day: Option<bool>,
}

impl Conditions {
    pub const UNKNOWN: Self = Self {
        time: None,
        temperature_2m_c: None,
        apparent_temperature_c: None,
        relative_humidity_2m: None,
        weather_code: None,
        pressure_msl_hpa: None,
        wind_speed_10m: None,
        wind_direction_10m: None,
        visibility_m: None,
        uv_index: None,
        cloud_cover: None,
        precipitation_probability: None,
        is_day: None,
    };

    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            time: self.time.or(fallback.time),
            temperature_2m_c: self.temperature_2m_c.or(fallback.temperature_2m_c),
            apparent_temperature_c: self
                .apparent_temperature_c
                .or(fallback.apparent_temperature_c),
            relative_humidity_2m: self.relative_humidity_2m.or(fallback.relative_humidity_2m),
            weather_code: self.weather_code.or(fallback.weather_code),
            pressure_msl_hpa: self.pressure_msl_hpa.or(fallback.pressure_msl_hpa),
            wind_speed_10m: self.wind_speed_10m.or(fallback.wind_speed_10m),
            wind_direction_10m: self.wind_direction_10m.or(fallback.wind_direction_10m),
            visibility_m: self.visibility_m.or(fallback.visibility_m),
            uv_index: self.uv_index.or(fallback.uv_index),
            cloud_cover: self.cloud_cover.or(fallback.cloud_cover),
            precipitation_probability: self
                .precipitation_probability
                .or(fallback.precipitation_probability),
            is_day: self.is_day.or(fallback.is_day),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecast {
    pub time: NaiveDateTime,
    pub temperature_2m_c: Option<f32>,
    pub apparent_temperature_c: Option<f32>,
    pub relative_humidity_2m: Option<f32>,
    pub weather_code: Option<u8>,
    pub pressure_msl_hpa: Option<f32>,
    pub wind_speed_10m: Option<f32>,
    pub wind_direction_10m: Option<f32>,
    pub visibility_m: Option<f32>,
    pub uv_index: Option<f32>,
    pub cloud_cover: Option<f32>,
    pub precipitation_probability: Option<f32>,
    pub is_day: Option<bool>,
}

impl HourlyForecast {
    #[must_use]
    pub fn conditions(&self) -> Conditions {
        Conditions {
            time: Some(self.time),
            temperature_2m_c: self.temperature_2m_c,
            apparent_temperature_c: self.apparent_temperature_c,
            relative_humidity_2m: self.relative_humidity_2m,
            weather_code: self.weather_code,
            pressure_msl_hpa: self.pressure_msl_hpa,
            wind_speed_10m: self.wind_speed_10m,
            wind_direction_10m: self.wind_direction_10m,
            visibility_m: self.visibility_m,
            uv_index: self.uv_index,
            cloud_cover: self.cloud_cover,
            precipitation_probability: self.precipitation_probability,
            is_day: self.is_day,
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: Option<u8>,
    pub temperature_max_c: Option<f32>,
    pub temperature_min_c: Option<f32>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    pub precipitation_sum_mm: Option<f32>,
    pub wind_speed_max: Option<f32>,
    pub uv_index_max: Option<f32>,
}

/// Which slice of time a fetch covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    /// Rolling multi-day forecast starting today.
    Forecast,
    /// One calendar day requested explicitly (calendar pick / history).
    SingleDate(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyForecast>,
    pub current: Option<Conditions>,
    pub utc_offset_seconds: i32,
    pub timezone: Option<String>,
    pub scope: FetchScope,
}

impl ForecastSeries {
    /// Wall clock expressed in the forecast location's local time, which is
    /// the frame the API timestamps are written in.
    #[must_use]
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.naive_utc() + chrono::Duration::seconds(i64::from(self.utc_offset_seconds))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RefreshMetadata {
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
}

impl RefreshMetadata {
    pub fn mark_attempt(&mut self) {
        self.last_attempt = Some(Utc::now());
    }

    pub fn mark_success(&mut self) {
        let now = Utc::now();
        self.last_attempt = Some(now);
        self.last_success = Some(now);
        self.consecutive_failures = 0;
    }

    pub fn mark_failure(&mut self) {
        self.last_attempt = Some(Utc::now());
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    pub fn age_minutes(&self) -> Option<i64> {
        self.last_success.map(|ts| (Utc::now() - ts).num_minutes())
    }
}

#[cfg(test)]
mod tests;
