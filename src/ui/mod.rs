pub mod layout;
pub mod snapshot;
pub mod theme;
mod widgets;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::state::{AppMode, AppState},
    render::SkyBackground,
};
use theme::{Theme, detect_color_capability, theme_for};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 20;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("environment-reader"));
        frame.render_widget(warning, area);
        return;
    }

    let capability = detect_color_capability();
    if !state.store.is_loaded() {
        let theme = theme_for(SkyBackground::Cloudy, capability);
        render_placeholder(frame, area, state, theme);
        return;
    }

    let view = state.view().dashboard();
    let theme = theme_for(view.sky.background, capability);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.surface)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);
    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);

    widgets::current::render(frame, rows[0], state, &view, theme);
    widgets::hourly::render(frame, rows[1], state, &view.hourly, theme);
    widgets::daily::render(frame, lower[0], state, &view.daily, theme);
    widgets::insights::render(frame, lower[1], &view.insights, state.icon_mode, theme);
    render_status_line(frame, rows[3], state, theme);

    if let Some(prompt) = &state.prompt {
        widgets::prompt::render(frame, centered_rect(60, 50, area), state, prompt, theme);
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let (headline, color) = match (&state.mode, &state.last_error) {
        (AppMode::Error, Some(error)) => (error.as_str(), theme.danger),
        _ => (state.loading_message.as_str(), theme.accent),
    };
    let mut lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(location) = state.location() {
        lines.push(Line::from(location.display_name.as_str()));
    }
    lines.push(Line::from(Span::styled(
        "r retry · / search · q quit",
        Style::default().fg(theme.muted_text),
    )));

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(widgets::shared::panel_block(" environment-reader ", theme));
    frame.render_widget(body, area);

    if let Some(prompt) = &state.prompt {
        widgets::prompt::render(frame, centered_rect(60, 50, area), state, prompt, theme);
    }
}

/// Left: error, status or loading text. Right: data age, units and key hints.
fn render_status_line(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let (message, color) = if let Some(error) = &state.last_error {
        (format!("⚠ {error}"), theme.danger)
    } else if state.fetch_in_flight {
        (state.loading_message.clone(), theme.accent)
    } else if let Some(status) = &state.status {
        (status.clone(), theme.warning)
    } else {
        (String::new(), theme.muted_text)
    };

    let age = match state.refresh_meta.age_minutes() {
        Some(0) => "updated just now".to_string(),
        Some(minutes) => format!("updated {minutes}m ago"),
        None => "not updated".to_string(),
    };
    let mut hints = format!("{age} · °{}", state.units.symbol());
    if area.width >= 110 {
        hints.push_str(" · ←→ hour ↑↓ day n now / search g date u units r refresh q quit");
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(hints.chars().count() as u16)])
        .split(area);
    frame.render_widget(
        Paragraph::new(message).style(Style::default().fg(color).bg(theme.surface)),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(hints)
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.muted_text).bg(theme.surface)),
        columns[1],
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
