use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table},
};

use super::shared::panel_block;
use crate::{
    app::state::AppState,
    domain::weather::weather_icon,
    render::DailyCard,
    ui::{layout::visible_window, theme::Theme},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, cards: &[DailyCard], theme: Theme) {
    let block = panel_block(" Daily ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if cards.is_empty() || inner.height == 0 {
        return;
    }

    let selected = cards.iter().position(|card| card.selected);
    let range = visible_window(cards.len(), selected, usize::from(inner.height));

    let rows = cards[range].iter().map(|card| {
        let style = if card.selected {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.text)
        };
        let rain = card
            .rain_mm
            .map_or_else(String::new, |mm| format!("{mm} mm"));
        Row::new([
            Cell::from(card.label.clone()),
            Cell::from(weather_icon(card.condition.code, state.icon_mode)),
            Cell::from(format!("{} / {}", card.high, card.low)),
            Cell::from(rain),
            Cell::from(format!("UV {} {}", card.uv_max, card.uv_level)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Min(8),
    ];
    frame.render_widget(Table::new(rows, widths).column_spacing(1), inner);
}
