//! Plain-text dashboard for `--one-shot`.

use std::fmt::Write as _;

use super::{
    layout::visible_window,
    widgets::{current::sky_summary, shared::compass},
};
use crate::{app::state::AppState, domain::weather::weather_icon};

const SNAPSHOT_HOURS: usize = 12;

#[must_use]
pub fn snapshot_text(state: &AppState) -> String {
    let mut out = String::new();
    if let Some(location) = state.location() {
        let _ = writeln!(
            out,
            "{} ({}, {})",
            location.display_name,
            location.provenance.label(),
            location.details()
        );
    }
    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "Error: {error}");
    }
    if !state.store.is_loaded() {
        if state.last_error.is_none() {
            let _ = writeln!(out, "{}", state.loading_message);
        }
        return out;
    }

    let view = state.view().dashboard();
    let mode = state.icon_mode;
    let current = &view.current;

    let _ = writeln!(
        out,
        "{} · {}",
        view.selected_time.title, view.selected_time.detail
    );
    let extreme = current
        .extreme
        .map(|extreme| format!(" ({})", extreme.label()))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{} {} {}{extreme}, feels like {}",
        weather_icon(current.condition.code, mode),
        current.temperature,
        current.condition.description,
        current.feels_like
    );
    let wind_dir = current
        .wind_direction_deg
        .map(|deg| format!(" {}", compass(deg)))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "Humidity {}% · Wind {} km/h{wind_dir} · Pressure {} hPa · Visibility {} km · UV {} · Clouds {}%",
        current.humidity_pct,
        current.wind_kmh,
        current.pressure_hpa,
        current.visibility_km,
        current.uv_index,
        current.cloud_cover_pct
    );
    let _ = writeln!(out, "{}", sky_summary(&view.sky, mode));

    let _ = writeln!(out, "\nHourly");
    let selected = view.hourly.iter().position(|card| card.selected);
    for card in &view.hourly[visible_window(view.hourly.len(), selected, SNAPSHOT_HOURS)] {
        let marker = if card.selected { ">" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<14} {} {:>5} {:>3}%",
            card.label,
            weather_icon(card.condition.code, mode),
            card.temperature,
            card.precipitation_probability
        );
    }

    let _ = writeln!(out, "\nDaily");
    for card in &view.daily {
        let marker = if card.selected { ">" } else { " " };
        let rain = card
            .rain_mm
            .map(|mm| format!(" · {mm} mm"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{marker} {:<10} {} {} / {}{rain} · UV {} {}",
            card.label,
            weather_icon(card.condition.code, mode),
            card.high,
            card.low,
            card.uv_max,
            card.uv_level
        );
    }

    if !view.insights.is_empty() {
        let _ = writeln!(out, "\nInsights");
        for insight in &view.insights {
            let _ = writeln!(out, "- {}: {}", insight.title, insight.content);
        }
    }
    out
}
