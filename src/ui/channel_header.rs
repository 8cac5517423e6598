use crate::app::message::ChannelKind;
use crate::app::state::{AppState, APP_NAME};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let paragraph = Paragraph::new(header_line(state)).style(Theme::header());
    frame.render_widget(paragraph, area);
}

pub fn header_line(state: &AppState) -> Line<'static> {
    let bg = Theme::BG_ELEVATED;
    let separator = Span::styled(" │ ", Style::default().fg(Theme::BORDER_DIM).bg(bg));

    let Some(channel) = state.active_channel() else {
        return Line::from(vec![
            Span::styled(" 🦀 ", Style::default().fg(Theme::ACCENT_TEAL).bg(bg)),
            Span::styled(
                APP_NAME,
                Style::default()
                    .fg(Theme::TEXT_PRIMARY)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            separator,
            Span::styled(
                "Tab to switch channels",
                Style::default()
                    .fg(Theme::TEXT_SECONDARY)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]);
    };

    let (icon, accent) = match channel.kind {
        ChannelKind::Lobby => (" ◆ ", Theme::ACCENT_GREEN),
        ChannelKind::Channel => (" # ", Theme::ACCENT_TEAL),
        ChannelKind::Query => (" → ", Theme::ACCENT_LAVENDER),
    };
    let accent_style = Style::default()
        .fg(accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let name = match channel.kind {
        ChannelKind::Lobby => state
            .network_of(channel.id)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| channel.name.clone()),
        ChannelKind::Channel | ChannelKind::Query => channel.name.clone(),
    };

    let mut spans = vec![
        Span::styled(icon, accent_style),
        Span::styled(name, accent_style),
    ];
    if channel.kind == ChannelKind::Channel {
        let users = if channel.users_outdated {
            "members updating…".to_string()
        } else {
            format!("{} users", channel.nicks.len())
        };
        spans.push(separator);
        spans.push(Span::styled(
            users,
            Style::default()
                .fg(Theme::TEXT_SECONDARY)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{channel, network, state_with};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_per_channel_kind() {
        let mut rust = channel(2, "#rust", ChannelKind::Channel);
        rust.nicks = vec!["alice".into(), "bob".into()];
        let mut state = state_with(vec![network(
            "net-a",
            vec![
                channel(1, "irc.libera.chat", ChannelKind::Lobby),
                rust,
                channel(3, "carol", ChannelKind::Query),
            ],
        )]);
        assert!(text(&header_line(&state)).contains(APP_NAME));

        state.set_active_channel(1);
        assert_eq!(text(&header_line(&state)), " ◆ net-a");
        state.set_active_channel(2);
        assert_eq!(text(&header_line(&state)), " # #rust │ 2 users");
        state.set_active_channel(3);
        assert_eq!(text(&header_line(&state)), " → carol");
    }
}
