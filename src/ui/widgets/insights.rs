use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::shared::panel_block;
use crate::{cli::IconMode, render::Insight, ui::theme::Theme};

pub fn render(frame: &mut Frame, area: Rect, insights: &[Insight], mode: IconMode, theme: Theme) {
    let block = panel_block(" Insights ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = if insights.is_empty() {
        vec![Line::from(Span::styled(
            "Nothing notable right now",
            Style::default().fg(theme.muted_text),
        ))]
    } else {
        insights
            .iter()
            .map(|insight| {
                let icon = match mode {
                    IconMode::Emoji => format!("{} ", insight.icon),
                    IconMode::Ascii => "* ".to_string(),
                };
                Line::from(vec![
                    Span::raw(icon),
                    Span::styled(
                        format!("{}: ", insight.title),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(insight.content.clone()),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
