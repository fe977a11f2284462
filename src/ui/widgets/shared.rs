use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

use crate::ui::theme::Theme;

pub fn panel_block(title: impl Into<String>, theme: Theme) -> Block<'static> {
    Block::default()
        .title(title.into())
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.text).bg(theme.surface))
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

pub fn popup_panel_style(theme: Theme) -> Style {
    Style::default()
        .fg(theme.popup_text)
        .bg(theme.popup_surface)
}

pub fn popup_block(title: &'static str, theme: Theme) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(popup_panel_style(theme))
        .border_style(
            Style::default()
                .fg(theme.popup_border)
                .bg(theme.popup_surface),
        )
}

pub fn compass(deg: f32) -> &'static str {
    const DIRS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    DIRS[((deg.rem_euclid(360.0) / 45.0).round() as usize) % DIRS.len()]
}

#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn sparkline_blocks(values: &[f32], width: usize) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let span = (max - min).max(0.001);
    (0..width)
        .map(|idx| {
            let src = (idx * values.len() / width).min(values.len() - 1);
            let norm = ((values[src] - min) / span).clamp(0.0, 1.0);
            BARS[(norm * (BARS.len() - 1) as f32).round() as usize]
        })
        .collect()
}
