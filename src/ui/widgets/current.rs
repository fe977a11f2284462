use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::shared::{compass, panel_block};
use crate::{
    app::state::AppState,
    cli::IconMode,
    domain::weather::weather_icon,
    render::{DashboardView, SkyView},
    ui::theme::{Theme, temp_color},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, view: &DashboardView, theme: Theme) {
    let title = state
        .location()
        .map_or_else(|| " Locating... ".to_string(), |loc| format!(" {} ", loc.short_name()));
    let block = panel_block(title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = &view.current;
    let celsius = state.view().selected_conditions().temperature_2m_c;
    let temp_style = Style::default()
        .fg(celsius.map_or(theme.text, |c| temp_color(&theme, c)))
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(theme.muted_text);

    let mut headline = vec![
        Span::raw(format!("{} ", weather_icon(current.condition.code, state.icon_mode))),
        Span::styled(current.temperature.clone(), temp_style),
        Span::raw("  "),
        Span::raw(current.condition.description),
    ];
    if let Some(extreme) = current.extreme {
        headline.push(Span::styled(
            format!("  {} {}", extreme.marker(state.icon_mode), extreme.label()),
            Style::default().fg(theme.accent),
        ));
    }

    let wind = match current.wind_direction_deg {
        Some(deg) => format!("{} km/h {}", current.wind_kmh, compass(deg)),
        None => format!("{} km/h", current.wind_kmh),
    };

    let mut lines = vec![
        Line::from(headline),
        Line::from(Span::styled(format!("Feels like {}", current.feels_like), muted)),
        Line::from(vec![
            Span::styled(
                view.selected_time.title.clone(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", view.selected_time.detail), muted),
        ]),
        Line::from(format!(
            "Humidity {}%   Wind {wind}   Pressure {} hPa",
            current.humidity_pct, current.pressure_hpa
        )),
        Line::from(format!(
            "Visibility {} km   UV {}   Clouds {}%",
            current.visibility_km, current.uv_index, current.cloud_cover_pct
        )),
        Line::from(Span::styled(sky_summary(&view.sky, state.icon_mode), muted)),
    ];
    if let Some(location) = state.location() {
        lines.push(Line::from(Span::styled(
            format!(
                "{} · {} · {}",
                location.display_name,
                location.provenance.label(),
                location.details()
            ),
            muted,
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

/// One-line description of the sky scene behind the dashboard.
pub fn sky_summary(sky: &SkyView, mode: IconMode) -> String {
    let mut parts = vec![format!(
        "Sky: {} · {} air",
        sky.background.as_str(),
        sky.temperature_band.as_str()
    )];
    if sky.is_day {
        let sun = match mode {
            IconMode::Emoji => "☀",
            IconMode::Ascii => "sun",
        };
        let rays = if sky.sun_rays { " with rays" } else { "" };
        parts.push(format!("{sun} {:.0}%{rays}", sky.sun_opacity * 100.0));
    } else if let Some(moon) = sky.moon_opacity {
        let moon_icon = match mode {
            IconMode::Emoji => "☾",
            IconMode::Ascii => "moon",
        };
        parts.push(format!("{moon_icon} {:.0}% · {} stars", moon * 100.0, sky.star_count));
    }
    if let Some(wind) = sky.wind {
        let kind = if wind.strong { "gusts" } else { "breeze" };
        parts.push(format!("{} {kind} streaks", wind.count));
    }
    if sky.mist {
        parts.push("mist".to_string());
    }
    if !sky.effects.is_empty() {
        let effects = sky
            .effects
            .iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(effects);
    }
    parts.join(" · ")
}
