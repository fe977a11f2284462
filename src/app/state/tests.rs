use chrono::{NaiveDate, TimeZone, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use super::{AppMode, AppState, Prompt, Services, input::is_query_char, methods_fetch::search_key};
use crate::{
    app::events::AppEvent,
    data::{
        forecast::{FetchError, ForecastClient},
        geocode::SearchResult,
    },
    domain::weather::{FetchScope, ForecastSeries, LocationRecord, Provenance, Units, parse_date},
    forecast::Selection,
    test_support::{hourly_rows, series_from, test_cli, week_series},
};

fn fixed_clock() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 12, 10, 30, 0).unwrap()
}

/// Clients pointed at a closed local port so spawned loads fail fast.
fn offline_services() -> Services {
    Services {
        forecast: ForecastClient::with_base_url("http://127.0.0.1:9/v1/forecast"),
        ..Services::default()
    }
}

fn state() -> AppState {
    let mut state = AppState::with_services(&test_cli(), offline_services(), false);
    state.set_clock(fixed_clock);
    state
}

fn bengaluru() -> LocationRecord {
    LocationRecord::new(12.9716, 77.5946, "Bengaluru, Karnataka, India", Provenance::Search)
}

async fn send(state: &mut AppState, tx: &mpsc::Sender<AppEvent>, event: AppEvent) {
    state.handle_event(event, tx, &test_cli()).await.unwrap();
}

async fn press(state: &mut AppState, tx: &mpsc::Sender<AppEvent>, code: KeyCode) {
    let key = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
    send(state, tx, AppEvent::Input(key)).await;
}

async fn type_text(state: &mut AppState, tx: &mpsc::Sender<AppEvent>, text: &str) {
    for ch in text.chars() {
        press(state, tx, KeyCode::Char(ch)).await;
    }
}

async fn loaded_state(tx: &mpsc::Sender<AppEvent>) -> AppState {
    let mut state = state();
    let generation = state.session.set_location(bengaluru());
    let request = state.forecast_request();
    send(
        &mut state,
        tx,
        AppEvent::ForecastLoaded {
            generation,
            request,
            series: week_series(),
        },
    )
    .await;
    state
}

fn single_day(day: NaiveDate) -> ForecastSeries {
    let start = day.and_hms_opt(0, 0, 0).unwrap();
    let mut series = series_from(hourly_rows(start, 24), 1);
    series.scope = FetchScope::SingleDate(day);
    series
}

/// Delivers `series` as the answer to the most recent load.
async fn deliver(state: &mut AppState, tx: &mpsc::Sender<AppEvent>, series: ForecastSeries) {
    let generation = state.session.generation();
    let request = state.forecast_request();
    send(
        state,
        tx,
        AppEvent::ForecastLoaded {
            generation,
            request,
            series,
        },
    )
    .await;
}

fn pointer_on_pinned_date(state: &AppState) -> bool {
    match state.selection.pinned_date() {
        Some(date) => state
            .store
            .hourly_time(state.selection.hour_index())
            .is_some_and(|time| time.date() == date),
        None => true,
    }
}

#[test]
fn query_chars_allow_place_punctuation() {
    assert!(is_query_char('é'));
    assert!(is_query_char('\''));
    assert!(is_query_char(','));
    assert!(!is_query_char('\n'));
    assert!(!is_query_char('/'));
}

#[test]
fn search_key_normalizes_case_and_padding() {
    assert_eq!(search_key("  New Delhi "), "new delhi");
}

#[tokio::test]
async fn first_load_goes_live_and_fills_cache() {
    let (tx, _rx) = mpsc::channel(16);
    let state = loaded_state(&tx).await;

    assert_eq!(state.mode, AppMode::Ready);
    assert!(state.selection.is_live());
    assert_eq!(state.selection.hour_index(), 10);
    assert!(state.cache.is_valid(&bengaluru(), fixed_clock()));
    assert_eq!(state.refresh_meta.consecutive_failures, 0);
}

#[tokio::test]
async fn arrow_keys_pin_and_wrap() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;

    press(&mut state, &tx, KeyCode::Right).await;
    assert_eq!(state.selection.hour_index(), 11);
    assert_eq!(
        state.selection.selection(),
        Selection::Pinned {
            date: parse_date("2026-02-12").unwrap()
        }
    );

    press(&mut state, &tx, KeyCode::Up).await;
    assert_eq!(state.selection.day_index(), 6);
    assert_eq!(state.selection.hour_index(), 6 * 24 + 12);

    press(&mut state, &tx, KeyCode::Home).await;
    assert!(state.selection.is_live());
    assert_eq!(state.selection.hour_index(), 10);
}

#[tokio::test]
async fn forecast_for_previous_location_is_dropped() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = state();
    let stale = state.session.set_location(bengaluru());
    state
        .session
        .set_location(LocationRecord::default_location());
    let request = state.forecast_request();

    send(
        &mut state,
        &tx,
        AppEvent::ForecastLoaded {
            generation: stale,
            request,
            series: week_series(),
        },
    )
    .await;

    assert!(!state.store.is_loaded());
    assert_eq!(state.mode, AppMode::Loading);
}

#[tokio::test]
async fn failed_refresh_keeps_last_series_on_screen() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;
    let generation = state.session.generation();
    let request = state.forecast_request();

    send(
        &mut state,
        &tx,
        AppEvent::ForecastFailed {
            generation,
            request,
            error: FetchError::Timeout(15),
        },
    )
    .await;

    assert_eq!(state.mode, AppMode::Error);
    assert!(state.store.is_loaded());
    assert_eq!(
        state.last_error.as_deref(),
        Some("weather request timed out after 15s")
    );
    assert_eq!(state.refresh_meta.consecutive_failures, 1);
}

#[tokio::test]
async fn single_date_series_pins_noon() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;
    let day = parse_date("2025-12-01").unwrap();
    state.jump_to_date(&tx, day);

    deliver(&mut state, &tx, single_day(day)).await;

    assert_eq!(state.selection.selection(), Selection::Pinned { date: day });
    assert_eq!(state.selection.hour_index(), 12);
    assert_eq!(state.selection.day_index(), 0);
    // single-date payloads never reach the cache
    let cached = state.cache.entry().map(|entry| entry.series.scope);
    assert_eq!(cached, Some(FetchScope::Forecast));
}

#[tokio::test]
async fn pinned_day_survives_a_reload() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;
    press(&mut state, &tx, KeyCode::Down).await;
    press(&mut state, &tx, KeyCode::Down).await;
    let pinned = state.selection.selection();

    let mut shifted: ForecastSeries = week_series();
    shifted.hourly.drain(..24);
    shifted.daily.remove(0);
    let generation = state.session.generation();
    let request = state.forecast_request();
    send(
        &mut state,
        &tx,
        AppEvent::ForecastLoaded {
            generation,
            request,
            series: shifted,
        },
    )
    .await;

    assert_eq!(state.selection.selection(), pinned);
    assert_eq!(state.selection.day_index(), 1);
    assert_eq!(state.selection.hour_index(), 24 + 12);
}

#[tokio::test]
async fn clock_tick_moves_only_live_pointer() {
    fn later() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 12, 13, 5, 0).unwrap()
    }
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;

    state.set_clock(later);
    send(&mut state, &tx, AppEvent::ClockTick).await;
    assert_eq!(state.selection.hour_index(), 13);

    press(&mut state, &tx, KeyCode::Left).await;
    state.set_clock(fixed_clock);
    send(&mut state, &tx, AppEvent::ClockTick).await;
    assert_eq!(state.selection.hour_index(), 12);
}

#[tokio::test]
async fn date_prompt_rejects_malformed_dates() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;

    press(&mut state, &tx, KeyCode::Char('g')).await;
    type_text(&mut state, &tx, "2026-13-0x1").await;
    assert_eq!(
        state.prompt,
        Some(Prompt::Date {
            input: "2026-13-01".to_string()
        })
    );

    press(&mut state, &tx, KeyCode::Enter).await;
    assert!(state.prompt.is_some());
    assert!(
        state
            .status
            .as_deref()
            .is_some_and(|s| s.contains("YYYY-MM-DD"))
    );

    press(&mut state, &tx, KeyCode::Esc).await;
    assert!(state.prompt.is_none());
    assert_eq!(state.mode, AppMode::Ready);
}

#[tokio::test]
async fn cached_suggestions_skip_the_network() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;
    let pune = SearchResult {
        name: "Pune".to_string(),
        display_name: "Pune, Maharashtra, India".to_string(),
        latitude: 18.52,
        longitude: 73.85,
        region: Some("Maharashtra".to_string()),
        country: Some("India".to_string()),
    };

    press(&mut state, &tx, KeyCode::Char('/')).await;
    type_text(&mut state, &tx, "Pune").await;
    send(
        &mut state,
        &tx,
        AppEvent::SearchResults {
            query: "pune".to_string(),
            results: vec![pune.clone()],
        },
    )
    .await;
    assert_eq!(state.suggestions, vec![pune.clone()]);

    press(&mut state, &tx, KeyCode::Esc).await;
    press(&mut state, &tx, KeyCode::Char('/')).await;
    type_text(&mut state, &tx, "PUNE").await;
    send(&mut state, &tx, AppEvent::SearchDue("PUNE".to_string())).await;
    assert_eq!(state.suggestions, vec![pune]);
}

#[tokio::test]
async fn late_results_for_an_old_query_are_not_shown() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;

    press(&mut state, &tx, KeyCode::Char('/')).await;
    type_text(&mut state, &tx, "Mumbai").await;
    send(
        &mut state,
        &tx,
        AppEvent::SearchResults {
            query: "mum".to_string(),
            results: Vec::new(),
        },
    )
    .await;

    assert!(state.suggestions.is_empty());
    assert!(state.status.is_none());
}

#[tokio::test]
async fn unit_toggle_flips_display_units() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;
    assert_eq!(state.units, Units::Celsius);

    press(&mut state, &tx, KeyCode::Char('u')).await;

    assert_eq!(state.units, Units::Fahrenheit);
    assert_eq!(state.view().current_conditions().temperature, "73°");
}

#[tokio::test]
async fn quit_keys_emit_quit_event() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;

    press(&mut state, &tx, KeyCode::Char('q')).await;

    assert!(matches!(rx.recv().await, Some(AppEvent::Quit)));
}

#[tokio::test]
async fn late_refresh_does_not_replace_a_date_jump() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;
    let generation = state.session.generation();
    let day = parse_date("2025-06-01").unwrap();

    state.refresh(&tx);
    let refresh_request = state.forecast_request();
    state.jump_to_date(&tx, day);
    deliver(&mut state, &tx, single_day(day)).await;
    send(
        &mut state,
        &tx,
        AppEvent::ForecastLoaded {
            generation,
            request: refresh_request,
            series: week_series(),
        },
    )
    .await;

    assert_eq!(state.store.scope(), Some(FetchScope::SingleDate(day)));
    assert_eq!(state.selection.pinned_date(), Some(day));
    assert!(pointer_on_pinned_date(&state));
}

#[tokio::test]
async fn superseded_failure_leaves_mode_alone() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;
    let generation = state.session.generation();

    state.refresh(&tx);
    let stale = state.forecast_request();
    state.jump_to_date(&tx, parse_date("2025-06-01").unwrap());
    send(
        &mut state,
        &tx,
        AppEvent::ForecastFailed {
            generation,
            request: stale,
            error: FetchError::Timeout(15),
        },
    )
    .await;

    assert_eq!(state.mode, AppMode::Ready);
    assert!(state.fetch_in_flight);
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn refresh_of_a_jumped_day_keeps_the_chosen_hour() {
    let (tx, _rx) = mpsc::channel(16);
    let mut state = loaded_state(&tx).await;
    let day = parse_date("2025-06-01").unwrap();
    state.jump_to_date(&tx, day);
    deliver(&mut state, &tx, single_day(day)).await;
    for _ in 0..6 {
        press(&mut state, &tx, KeyCode::Right).await;
    }
    assert_eq!(state.selection.hour_index(), 18);

    state.refresh(&tx);
    deliver(&mut state, &tx, single_day(day)).await;

    assert_eq!(state.selection.hour_index(), 18);
    assert_eq!(state.selection.pinned_date(), Some(day));
}
