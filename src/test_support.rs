use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use clap::Parser;

use crate::{
    cli::Cli,
    domain::weather::{
        Conditions, DailyForecast, FetchScope, ForecastSeries, HourlyForecast, parse_datetime,
    },
};

pub(crate) fn time(value: &str) -> NaiveDateTime {
    parse_datetime(value).expect("valid time fixture")
}

pub(crate) fn test_cli() -> Cli {
    Cli::parse_from(["environment-reader", "Bengaluru"])
}

pub(crate) fn hourly_row(time: NaiveDateTime) -> HourlyForecast {
    let hour = time.hour();
    HourlyForecast {
        time,
        temperature_2m_c: Some(18.0 + hour as f32 * 0.5),
        apparent_temperature_c: Some(17.0 + hour as f32 * 0.5),
        relative_humidity_2m: Some(60.0),
        weather_code: Some(1),
        pressure_msl_hpa: Some(1012.0),
        wind_speed_10m: Some(8.0),
        wind_direction_10m: Some(200.0),
        visibility_m: Some(20_000.0),
        uv_index: Some(if (6..18).contains(&hour) { 4.0 } else { 0.0 }),
        cloud_cover: Some(20.0),
        precipitation_probability: Some(10.0),
        is_day: Some((6..18).contains(&hour)),
    }
}

/// `count` consecutive hourly rows starting at `start`.
pub(crate) fn hourly_rows(start: NaiveDateTime, count: usize) -> Vec<HourlyForecast> {
    (0..count)
        .map(|idx| hourly_row(start + Duration::hours(idx as i64)))
        .collect()
}

pub(crate) fn daily_row(date: NaiveDate, max: f32, min: f32) -> DailyForecast {
    DailyForecast {
        date,
        weather_code: Some(1),
        temperature_max_c: Some(max),
        temperature_min_c: Some(min),
        sunrise: date.and_hms_opt(6, 10, 0),
        sunset: date.and_hms_opt(18, 5, 0),
        precipitation_sum_mm: Some(0.0),
        wind_speed_max: Some(12.0),
        uv_index_max: Some(5.0),
    }
}

/// Series whose `days` daily rows start on the date of the first hourly row.
pub(crate) fn series_from(hourly: Vec<HourlyForecast>, days: usize) -> ForecastSeries {
    let first = hourly
        .first()
        .map_or_else(|| NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date"), HourlyForecast::date);
    let daily = (0..days)
        .map(|idx| daily_row(first + Duration::days(idx as i64), 29.5, 18.0))
        .collect();
    let current = hourly.first().map(|row| Conditions {
        time: None,
        ..row.conditions()
    });
    ForecastSeries {
        hourly,
        daily,
        current,
        utc_offset_seconds: 0,
        timezone: Some("UTC".to_string()),
        scope: FetchScope::Forecast,
    }
}

/// 7 days of 24 hourly rows from midnight on 2026-02-12.
pub(crate) fn week_series() -> ForecastSeries {
    series_from(hourly_rows(time("2026-02-12T00:00"), 24 * 7), 7)
}
