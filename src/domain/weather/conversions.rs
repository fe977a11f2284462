use chrono::{NaiveDate, NaiveDateTime, Timelike};

use super::Units;

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

/// `"21°"` in the requested units, `"--°"` when unknown.
#[must_use]
pub fn format_temperature(celsius: Option<f32>, units: Units) -> String {
    match celsius {
        Some(value) => format!("{}°", round_temp(convert_temp(value, units))),
        None => "--°".to_string(),
    }
}

#[must_use]
pub fn uv_level(uv_index: i32) -> &'static str {
    match uv_index {
        i32::MIN..=2 => "Low",
        3..=5 => "Moderate",
        6..=7 => "High",
        8..=10 => "Very High",
        _ => "Extreme",
    }
}

/// Same calendar day and same hour of day; minutes are ignored.
#[must_use]
pub fn same_hour(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date() && a.hour() == b.hour()
}

#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub(crate) fn is_tomorrow(date: NaiveDate, today: NaiveDate) -> bool {
    today.succ_opt() == Some(date)
}

pub(crate) fn is_yesterday(date: NaiveDate, today: NaiveDate) -> bool {
    today.pred_opt() == Some(date)
}

pub(crate) fn weekday_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}
