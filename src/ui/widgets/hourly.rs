use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table},
};

use super::shared::{panel_block, sparkline_blocks};
use crate::{
    app::state::AppState,
    domain::weather::weather_icon,
    render::{HourlyCard, TemperatureExtreme},
    ui::{
        layout::{visible_hour_count, visible_window},
        theme::Theme,
    },
};

const COLUMN_WIDTH: u16 = 9;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, cards: &[HourlyCard], theme: Theme) {
    let block = panel_block(" Hourly ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if cards.is_empty() || inner.height == 0 {
        return;
    }

    let selected = cards.iter().position(|card| card.selected);
    let range = visible_window(cards.len(), selected, visible_hour_count(area.width));
    let slice = &cards[range];

    let highlight = |card: &HourlyCard| {
        if card.selected {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else if card.is_now {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_text)
        }
    };

    let times = Row::new(
        slice
            .iter()
            .map(|card| Cell::from(card.label.clone()).style(highlight(card))),
    );
    let icons = Row::new(
        slice
            .iter()
            .map(|card| Cell::from(weather_icon(card.condition.code, state.icon_mode))),
    );
    let temps = Row::new(slice.iter().map(|card| {
        let color = match card.extreme {
            Some(TemperatureExtreme::High) => theme.temp_hot,
            Some(TemperatureExtreme::Low) => theme.temp_cold,
            None => theme.text,
        };
        let marker = card
            .extreme
            .map_or("", |extreme| extreme.marker(state.icon_mode));
        Cell::from(format!("{}{marker}", card.temperature))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
    }));
    let rain = Row::new(slice.iter().map(|card| {
        Cell::from(format!("{}%", card.precipitation_probability))
            .style(Style::default().fg(theme.muted_text))
    }));

    let widths = vec![Constraint::Length(COLUMN_WIDTH); slice.len()];
    let table_height = inner.height.min(4);
    frame.render_widget(
        Table::new([times, icons, temps, rain], widths),
        Rect {
            height: table_height,
            ..inner
        },
    );

    if inner.height > table_height {
        let temps = slice
            .iter()
            .filter_map(|card| state.store.hourly().get(card.index))
            .filter_map(|row| row.temperature_2m_c)
            .collect::<Vec<_>>();
        let width = usize::from(COLUMN_WIDTH) * slice.len();
        let trend = Paragraph::new(sparkline_blocks(&temps, width.min(usize::from(inner.width))))
            .style(Style::default().fg(theme.accent));
        frame.render_widget(
            trend,
            Rect {
                y: inner.y + table_height,
                height: 1,
                ..inner
            },
        );
    }
}
