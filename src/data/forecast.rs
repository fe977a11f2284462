use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::http_client;
use crate::domain::weather::{
    Conditions, DailyForecast, FetchScope, ForecastSeries, HourlyForecast, LocationRecord,
    parse_date, parse_datetime,
};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const FORECAST_TIMEOUT_SECS: u64 = 15;
const FORECAST_DAYS: &str = "14";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,precipitation,weather_code,cloud_cover,pressure_msl,wind_speed_10m,wind_direction_10m,visibility,uv_index";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation_probability,weather_code,pressure_msl,cloud_cover,visibility,wind_speed_10m,wind_direction_10m,uv_index,is_day";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,precipitation_sum,wind_speed_10m_max,uv_index_max";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather request timed out after {0}s")]
    Timeout(u64),
    #[error("weather service returned {0}")]
    Status(StatusCode),
    #[error("weather service unreachable")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected weather payload")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    fn from_request(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else if let Some(status) = err.status() {
            Self::Status(status)
        } else if err.is_decode() {
            Self::Decode(err)
        } else {
            Self::Transport(err)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(FORECAST_TIMEOUT_SECS)),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(
        &self,
        location: &LocationRecord,
        scope: FetchScope,
    ) -> Result<ForecastSeries, FetchError> {
        let mut query = vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];
        match scope {
            FetchScope::Forecast => query.push(("forecast_days", FORECAST_DAYS.to_string())),
            FetchScope::SingleDate(date) => {
                let day = date.format("%Y-%m-%d").to_string();
                query.push(("start_date", day.clone()));
                query.push(("end_date", day));
            }
        }

        debug!(lat = location.latitude, lon = location.longitude, ?scope, "requesting forecast");
        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|err| FetchError::from_request(err, FORECAST_TIMEOUT_SECS))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "forecast request rejected");
            return Err(FetchError::Status(status));
        }

        let payload: ForecastResponse = response
            .json()
            .await
            .map_err(|err| FetchError::from_request(err, FORECAST_TIMEOUT_SECS))?;

        Ok(payload.into_series(scope))
    }
}

impl ForecastResponse {
    fn into_series(self, scope: FetchScope) -> ForecastSeries {
        ForecastSeries {
            hourly: parse_hourly(&self.hourly),
            daily: parse_daily(&self.daily),
            current: self.current.map(|block| block.conditions()),
            utc_offset_seconds: self.utc_offset_seconds,
            timezone: self.timezone,
            scope,
        }
    }
}

fn at<T: Copy>(values: &[Option<T>], idx: usize) -> Option<T> {
    values.get(idx).copied().flatten()
}

fn parse_hourly(hourly: &HourlyBlock) -> Vec<HourlyForecast> {
    let mut out = Vec::with_capacity(hourly.time.len());
    for (idx, raw) in hourly.time.iter().enumerate() {
        let Some(time) = parse_datetime(raw) else {
            continue;
        };

        out.push(HourlyForecast {
            time,
            temperature_2m_c: at(&hourly.temperature_2m, idx),
            apparent_temperature_c: at(&hourly.apparent_temperature, idx),
            relative_humidity_2m: at(&hourly.relative_humidity_2m, idx),
            weather_code: at(&hourly.weather_code, idx),
            pressure_msl_hpa: at(&hourly.pressure_msl, idx),
            wind_speed_10m: at(&hourly.wind_speed_10m, idx),
            wind_direction_10m: at(&hourly.wind_direction_10m, idx),
            visibility_m: at(&hourly.visibility, idx),
            uv_index: at(&hourly.uv_index, idx),
            cloud_cover: at(&hourly.cloud_cover, idx),
            precipitation_probability: at(&hourly.precipitation_probability, idx),
            is_day: at(&hourly.is_day, idx).map(|flag| flag == 1),
        });
    }
    out
}

fn parse_daily(daily: &DailyBlock) -> Vec<DailyForecast> {
    let mut out = Vec::with_capacity(daily.time.len());
    for (idx, raw) in daily.time.iter().enumerate() {
        let Some(date) = parse_date(raw) else {
            continue;
        };

        out.push(DailyForecast {
            date,
            weather_code: at(&daily.weather_code, idx),
            temperature_max_c: at(&daily.temperature_2m_max, idx),
            temperature_min_c: at(&daily.temperature_2m_min, idx),
            sunrise: daily
                .sunrise
                .get(idx)
                .and_then(|v| v.as_deref())
                .and_then(parse_datetime),
            sunset: daily
                .sunset
                .get(idx)
                .and_then(|v| v.as_deref())
                .and_then(parse_datetime),
            precipitation_sum_mm: at(&daily.precipitation_sum, idx),
            wind_speed_max: at(&daily.wind_speed_10m_max, idx),
            uv_index_max: at(&daily.uv_index_max, idx),
        });
    }
    out
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    timezone: Option<String>,
    current: Option<CurrentBlock>,
    #[serde(default)]
    hourly: HourlyBlock,
    #[serde(default)]
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: Option<f32>,
    relative_humidity_2m: Option<f32>,
    apparent_temperature: Option<f32>,
    is_day: Option<u8>,
    weather_code: Option<u8>,
    cloud_cover: Option<f32>,
    pressure_msl: Option<f32>,
    wind_speed_10m: Option<f32>,
    wind_direction_10m: Option<f32>,
    visibility: Option<f32>,
    uv_index: Option<f32>,
}

impl CurrentBlock {
    fn conditions(&self) -> Conditions {
        Conditions {
            time: self.time.as_deref().and_then(parse_datetime),
            temperature_2m_c: self.temperature_2m,
            apparent_temperature_c: self.apparent_temperature,
            relative_humidity_2m: self.relative_humidity_2m,
            weather_code: self.weather_code,
            pressure_msl_hpa: self.pressure_msl,
            wind_speed_10m: self.wind_speed_10m,
            wind_direction_10m: self.wind_direction_10m,
            visibility_m: self.visibility,
            uv_index: self.uv_index,
            cloud_cover: self.cloud_cover,
            precipitation_probability: None,
            is_day: self.is_day.map(|flag| flag == 1),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<Option<f32>>,
    relative_humidity_2m: Vec<Option<f32>>,
    apparent_temperature: Vec<Option<f32>>,
    precipitation_probability: Vec<Option<f32>>,
    weather_code: Vec<Option<u8>>,
    pressure_msl: Vec<Option<f32>>,
    cloud_cover: Vec<Option<f32>>,
    visibility: Vec<Option<f32>>,
    wind_speed_10m: Vec<Option<f32>>,
    wind_direction_10m: Vec<Option<f32>>,
    uv_index: Vec<Option<f32>>,
    is_day: Vec<Option<u8>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DailyBlock {
    time: Vec<String>,
    weather_code: Vec<Option<u8>>,
    temperature_2m_max: Vec<Option<f32>>,
    temperature_2m_min: Vec<Option<f32>>,
    sunrise: Vec<Option<String>>,
    sunset: Vec<Option<String>>,
    precipitation_sum: Vec<Option<f32>>,
    wind_speed_10m_max: Vec<Option<f32>>,
    uv_index_max: Vec<Option<f32>>,
}
