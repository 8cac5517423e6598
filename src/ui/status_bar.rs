use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const KEY_HINTS: &str = " Tab/S-Tab channel · PgUp/PgDn scroll · c collapse · q quit ";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    if state.alerted {
        parts.push(Span::styled(
            " ● ",
            Style::default()
                .fg(Theme::BG_DARK)
                .bg(Theme::ACCENT_AMBER)
                .add_modifier(Modifier::BOLD),
        ));
    }

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + KEY_HINTS.width());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        KEY_HINTS,
        Style::default().fg(Theme::TEXT_MUTED).bg(Theme::BG_ELEVATED),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
