#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use chrono::{NaiveDate, Utc};
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use environment_reader::{
    app::{
        events::AppEvent,
        state::{AppState, Services},
    },
    cli::Cli,
    data::{forecast::ForecastClient, geocode::GeocodeClient, geoip::GeoIpClient},
    domain::weather::{DailyForecast, FetchScope, ForecastSeries, HourlyForecast},
    forecast::ForecastStore,
};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const FORECAST_PATH: &str = "/v1/forecast";
pub const SEARCH_PATH: &str = "/v1/search";

pub fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["environment-reader"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

pub fn services(server: &MockServer) -> Services {
    let base = server.uri();
    Services {
        forecast: ForecastClient::with_base_url(format!("{base}{FORECAST_PATH}")),
        geocode: GeocodeClient::with_base_urls(
            format!("{base}{SEARCH_PATH}"),
            format!("{base}/nominatim"),
        ),
        geoip: GeoIpClient::with_base_urls(format!("{base}/ipapi"), format!("{base}/ip-api")),
    }
}

pub fn app(cli: &Cli, server: &MockServer) -> AppState {
    AppState::with_services(cli, services(server), false)
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Open-Meteo style payload: `days` days of hourly rows in UTC from
/// midnight on `start`.
pub fn forecast_payload(start: NaiveDate, days: usize) -> Value {
    let hours = days * 24;
    let times = (0..hours)
        .map(|idx| {
            let day = start + chrono::Duration::days((idx / 24) as i64);
            format!("{}T{:02}:00", day.format("%Y-%m-%d"), idx % 24)
        })
        .collect::<Vec<_>>();
    let dates = (0..days)
        .map(|idx| (start + chrono::Duration::days(idx as i64)).format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>();
    let temps = (0..hours).map(|idx| 16.0 + (idx % 24) as f64 * 0.5).collect::<Vec<_>>();

    json!({
        "utc_offset_seconds": 0,
        "timezone": "UTC",
        "current": {
            "time": times.first(),
            "temperature_2m": 21.0,
            "relative_humidity_2m": 55.0,
            "apparent_temperature": 20.0,
            "is_day": 1,
            "weather_code": 1,
            "cloud_cover": 25.0,
            "pressure_msl": 1011.0,
            "wind_speed_10m": 9.0,
            "wind_direction_10m": 250.0,
            "visibility": 24000.0,
            "uv_index": 3.0
        },
        "hourly": {
            "time": times,
            "temperature_2m": temps,
            "apparent_temperature": temps,
            "relative_humidity_2m": vec![60.0; hours],
            "precipitation_probability": vec![10.0; hours],
            "weather_code": vec![1; hours],
            "pressure_msl": vec![1012.0; hours],
            "cloud_cover": vec![20.0; hours],
            "visibility": vec![20000.0; hours],
            "wind_speed_10m": vec![8.0; hours],
            "wind_direction_10m": vec![200.0; hours],
            "uv_index": vec![2.0; hours],
            "is_day": (0..hours).map(|idx| u8::from((6..18).contains(&(idx % 24)))).collect::<Vec<_>>()
        },
        "daily": {
            "time": dates,
            "weather_code": vec![1; days],
            "temperature_2m_max": vec![27.5; days],
            "temperature_2m_min": vec![16.0; days],
            "precipitation_sum": vec![0.0; days],
            "wind_speed_10m_max": vec![14.0; days],
            "uv_index_max": vec![6.0; days]
        }
    })
}

pub async fn mount_forecast(server: &MockServer, days: usize) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(today(), days)))
        .mount(server)
        .await;
}

pub async fn forecast_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == FORECAST_PATH)
        .count()
}

pub fn key(code: KeyCode) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

pub async fn press(
    app: &mut AppState,
    cli: &Cli,
    tx: &mpsc::Sender<AppEvent>,
    code: KeyCode,
) {
    app.handle_event(key(code), tx, cli).await.expect("key event");
}

pub async fn type_text(app: &mut AppState, cli: &Cli, tx: &mpsc::Sender<AppEvent>, text: &str) {
    for ch in text.chars() {
        press(app, cli, tx, KeyCode::Char(ch)).await;
    }
}

/// Feeds queued events back into `app` until `done` holds.
pub async fn drive_until(
    app: &mut AppState,
    cli: &Cli,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
    done: impl Fn(&AppState) -> bool,
) {
    while !done(app) {
        let event = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("timed out waiting for an event")
            .expect("event channel closed");
        app.handle_event(event, tx, cli).await.expect("event handled");
    }
}

/// `days` days of hourly rows in a store, no network involved.
pub fn loaded_store(start: NaiveDate, days: usize) -> ForecastStore {
    let hourly = (0..days * 24)
        .map(|idx| {
            let time = start.and_hms_opt(0, 0, 0).expect("midnight") + chrono::Duration::hours(idx as i64);
            HourlyForecast {
                time,
                temperature_2m_c: Some(15.0),
                apparent_temperature_c: None,
                relative_humidity_2m: None,
                weather_code: Some(0),
                pressure_msl_hpa: None,
                wind_speed_10m: None,
                wind_direction_10m: None,
                visibility_m: None,
                uv_index: None,
                cloud_cover: None,
                precipitation_probability: None,
                is_day: None,
            }
        })
        .collect();
    let daily = (0..days)
        .map(|idx| DailyForecast {
            date: start + chrono::Duration::days(idx as i64),
            weather_code: Some(0),
            temperature_max_c: Some(20.0),
            temperature_min_c: Some(10.0),
            sunrise: None,
            sunset: None,
            precipitation_sum_mm: None,
            wind_speed_max: None,
            uv_index_max: None,
        })
        .collect();
    let mut store = ForecastStore::new();
    store.replace(Arc::new(ForecastSeries {
        hourly,
        daily,
        current: None,
        utc_offset_seconds: 0,
        timezone: None,
        scope: FetchScope::Forecast,
    }));
    store
}
