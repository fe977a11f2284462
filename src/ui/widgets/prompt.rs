use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::shared::{popup_block, popup_panel_style};
use crate::{
    app::state::{AppState, Prompt},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, prompt: &Prompt, theme: Theme) {
    frame.render_widget(Clear, area);

    let (title, label, input, placeholder) = match prompt {
        Prompt::Search { query } => (
            " Search location ",
            "City: ",
            query.as_str(),
            "Type a city or postal code",
        ),
        Prompt::Date { input } => (" Jump to date ", "Date: ", input.as_str(), "YYYY-MM-DD"),
    };
    let block = popup_block(title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let (text, text_style) = if input.is_empty() {
        (placeholder, Style::default().fg(theme.popup_muted_text))
    } else {
        (
            input,
            Style::default()
                .fg(theme.popup_text)
                .add_modifier(Modifier::BOLD),
        )
    };
    let input_line = Paragraph::new(Line::from(vec![
        Span::styled(label, Style::default().fg(theme.popup_muted_text)),
        Span::styled(text, text_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.popup_border)),
    );
    frame.render_widget(input_line, chunks[0]);

    if matches!(prompt, Prompt::Search { .. }) && !state.suggestions.is_empty() {
        let items = state
            .suggestions
            .iter()
            .map(|result| ListItem::new(result.label()))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .style(popup_panel_style(theme))
            .highlight_style(
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("› ");
        let mut list_state = ListState::default().with_selected(Some(state.suggestion_cursor));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    let hint = state.status.as_deref().unwrap_or(match prompt {
        Prompt::Search { .. } => "Enter select · ↑↓ move · Esc cancel",
        Prompt::Date { .. } => "Enter jump · Esc cancel",
    });
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(theme.popup_muted_text)),
        chunks[2],
    );
}
