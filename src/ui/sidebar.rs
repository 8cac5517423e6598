use crate::app::message::ChannelKind;
use crate::app::state::{AppState, Badge, Channel, Network};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Networks ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut items: Vec<ListItem> = network_lines(state).into_iter().map(ListItem::new).collect();

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            " Waiting for relay…",
            Style::default().fg(Theme::TEXT_MUTED),
        )));
    }

    frame.render_widget(List::new(items).block(block), area);
}

/// One line per network (its lobby) and, when expanded, one per channel.
pub fn network_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for network in &state.networks {
        lines.push(network_line(state, network));
        if network.collapsed {
            continue;
        }

        let channels: Vec<&Channel> = network
            .channels
            .iter()
            .filter(|c| c.kind != ChannelKind::Lobby)
            .collect();

        for (i, channel) in channels.iter().enumerate() {
            let tree_prefix = if i + 1 == channels.len() {
                " └─"
            } else {
                " ├─"
            };
            let mut spans = vec![
                Span::styled(tree_prefix, Style::default().fg(Theme::BORDER_DIM)),
                Span::styled(channel.name.clone(), channel_style(state, channel)),
            ];
            push_badge(&mut spans, channel.badge.as_ref());
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn network_line(state: &AppState, network: &Network) -> Line<'static> {
    let toggle = if network.collapsed { " ▸ " } else { " ▾ " };
    let lobby = network.lobby();
    let style = match lobby {
        Some(lobby) => channel_style(state, lobby),
        None => Theme::channel_normal(),
    };

    let mut spans = vec![
        Span::styled(toggle, Style::default().fg(Theme::ACCENT_TEAL)),
        Span::styled(network.name.clone(), style.add_modifier(Modifier::BOLD)),
    ];
    push_badge(&mut spans, lobby.and_then(|l| l.badge.as_ref()));
    Line::from(spans)
}

fn channel_style(state: &AppState, channel: &Channel) -> Style {
    if state.is_active(channel.id) {
        Theme::channel_active()
    } else if channel.highlight > 0 {
        Theme::channel_mention()
    } else if channel.unread > 0 {
        Theme::channel_unread()
    } else {
        Theme::channel_normal()
    }
}

fn push_badge(spans: &mut Vec<Span<'static>>, badge: Option<&Badge>) {
    let Some(badge) = badge else { return };
    let style = if badge.highlight {
        Theme::badge_highlight()
    } else {
        Theme::badge()
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(format!(" {} ", badge.text), style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{channel, network, state_with};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_collapsed_network_hides_channels() {
        let mut rust = channel(2, "#rust", ChannelKind::Channel);
        rust.unread = 1530;
        rust.refresh_badge(false);
        let mut net_a = network(
            "net-a",
            vec![channel(1, "libera", ChannelKind::Lobby), rust],
        );
        let net_b = network(
            "net-b",
            vec![
                channel(3, "oftc", ChannelKind::Lobby),
                channel(4, "#crab", ChannelKind::Channel),
            ],
        );

        let state = state_with(vec![net_a.clone(), net_b.clone()]);
        let lines: Vec<String> = network_lines(&state).iter().map(text).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], " └─#rust  1.5k ");

        net_a.collapsed = true;
        let state = state_with(vec![net_a, net_b]);
        let lines: Vec<String> = network_lines(&state).iter().map(text).collect();
        assert_eq!(lines, vec![" ▸ net-a", " ▾ net-b", " └─#crab"]);
    }
}
