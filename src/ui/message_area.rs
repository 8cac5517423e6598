use crate::app::message::MessageKind;
use crate::app::state::{AppState, Channel};
use crate::notify::format::strip_formatting;
use crate::sync::timeline::{CondensedGroup, MessageUnit, Template, Unit};
use crate::ui::theme::Theme;
use chrono::{Local, NaiveDate};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(channel) = state.active_channel() else {
        let empty = Paragraph::new("No channel open. Waiting for the relay to send its networks.")
            .style(Style::default().fg(Theme::TEXT_MUTED));
        frame.render_widget(empty, inner);
        return;
    };

    let lines = timeline_lines(channel, &state.config.ui.timestamp_format);
    let available_height = inner.height as usize;
    let total = lines.len();

    let end = total.saturating_sub(channel.scroll_offset);
    let start = end.saturating_sub(available_height);

    let visible: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();
    let paragraph = Paragraph::new(visible).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);

    if total > available_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(available_height)).position(start);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("┃")
            .track_symbol(Some("│"))
            .thumb_style(Style::default().fg(Theme::TEXT_SECONDARY))
            .track_style(Theme::border());

        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

/// Project a channel's timeline into display lines.
pub fn timeline_lines(channel: &Channel, ts_format: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if channel.show_more {
        lines.push(Line::from(Span::styled(
            "  ⋯ older messages were trimmed",
            Style::default()
                .fg(Theme::TEXT_MUTED)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let units = channel.timeline.units();
    for (i, unit) in units.iter().enumerate() {
        match unit {
            Unit::Message(m) if m.hidden => {}
            Unit::Message(m) => {
                lines.extend(message_lines(m, ts_format));
                for attachment in &m.attachments {
                    lines.push(Line::from(Span::styled(
                        format!("    ↳ {}", attachment),
                        Theme::preview(),
                    )));
                }
            }
            Unit::DateMarker(date) => lines.push(date_line(*date)),
            Unit::Condensed(group) => lines.push(condensed_line(group, ts_format)),
            // Nothing unread after it.
            Unit::UnreadMarker { .. } if i + 1 == units.len() => {}
            Unit::UnreadMarker { .. } => lines.push(Line::from(Span::styled(
                "──── new messages ────",
                Theme::unread_marker(),
            ))),
        }
    }

    lines
}

fn timestamp(time: chrono::DateTime<chrono::Utc>, ts_format: &str) -> Span<'static> {
    Span::styled(
        format!("[{}] ", time.with_timezone(&Local).format(ts_format)),
        Theme::timestamp(),
    )
}

fn nick_style(m: &MessageUnit) -> Style {
    if m.self_authored {
        Theme::nick_self()
    } else {
        Theme::nick_color(&m.nick)
    }
}

fn date_line(date: NaiveDate) -> Line<'static> {
    Line::from(Span::styled(
        format!("──── {} ────", date.format("%A, %d %B %Y")),
        Theme::date_marker(),
    ))
}

fn condensed_line(group: &CondensedGroup, ts_format: &str) -> Line<'static> {
    Line::from(vec![
        timestamp(group.time, ts_format),
        Span::styled(format!("⇄ {}", group.summary()), Theme::status_message()),
    ])
}

fn message_lines(m: &MessageUnit, ts_format: &str) -> Vec<Line<'static>> {
    let ts = timestamp(m.time, ts_format);
    let text = strip_formatting(&m.text);

    match m.template {
        Template::Message => {
            let text_style = if m.highlight {
                Theme::highlight_message()
            } else {
                match m.kind {
                    MessageKind::Notice => Theme::notice_message(),
                    MessageKind::Error => Theme::error_message(),
                    _ => Theme::message_text(),
                }
            };
            let prefix = match m.kind {
                MessageKind::Notice => {
                    Span::styled(format!("-{}- ", m.nick), Theme::notice_message())
                }
                MessageKind::Error => {
                    Span::styled("✘ ", Style::default().fg(Theme::ACCENT_ROSE))
                }
                _ => Span::styled(format!("<{}> ", m.nick), nick_style(m)),
            };
            vec![Line::from(vec![ts, prefix, Span::styled(text, text_style)])]
        }
        Template::Action(MessageKind::Motd) => text
            .lines()
            .enumerate()
            .map(|(i, line)| {
                let lead = if i == 0 {
                    ts.clone()
                } else {
                    Span::raw(" ".repeat(ts.content.chars().count()))
                };
                Line::from(vec![lead, Span::styled(line.to_string(), Theme::status_message())])
            })
            .collect(),
        Template::Action(kind) => {
            let (body, style) = action_text(kind, &m.nick, &text);
            let style = if m.highlight {
                Theme::highlight_message()
            } else {
                style
            };
            vec![Line::from(vec![ts, Span::styled(body, style)])]
        }
        Template::Unhandled => vec![Line::from(vec![
            ts,
            Span::styled(format!("• {}", text), Theme::status_message()),
        ])],
    }
}

fn action_text(kind: MessageKind, nick: &str, text: &str) -> (String, Style) {
    let suffix = |text: &str| {
        if text.is_empty() {
            String::new()
        } else {
            format!(" ({})", text)
        }
    };

    match kind {
        MessageKind::Action => (format!("* {} {}", nick, text), Theme::action_message()),
        MessageKind::Join => (format!("→ {} joined", nick), Theme::join_message()),
        MessageKind::Part => (format!("← {} left{}", nick, suffix(text)), Theme::part_message()),
        MessageKind::Quit => (format!("← {} quit{}", nick, suffix(text)), Theme::part_message()),
        MessageKind::Kick => (format!("✘ {} kicked {}", nick, text), Theme::part_message()),
        MessageKind::Nick => (format!("↻ {} is now {}", nick, text), Theme::status_message()),
        MessageKind::Mode | MessageKind::ModeChannel => {
            (format!("• {} sets mode {}", nick, text), Theme::status_message())
        }
        MessageKind::Away => (format!("• {} is away{}", nick, suffix(text)), Theme::status_message()),
        MessageKind::Back => (format!("• {} is back", nick), Theme::status_message()),
        MessageKind::Chghost => (format!("• {} changed host {}", nick, text), Theme::status_message()),
        MessageKind::Topic => (format!("• {} changed the topic to: {}", nick, text), Theme::status_message()),
        MessageKind::TopicSetBy => (format!("• Topic set by {}", text), Theme::status_message()),
        MessageKind::Invite => (format!("• {} invited you to {}", nick, text), Theme::notice_message()),
        MessageKind::Ctcp => (format!("• CTCP reply from {}: {}", nick, text), Theme::notice_message()),
        MessageKind::CtcpRequest => {
            (format!("• {} sent a CTCP request: {}", nick, text), Theme::notice_message())
        }
        MessageKind::Whois => (format!("• whois {}: {}", nick, text), Theme::status_message()),
        MessageKind::ChannelList | MessageKind::BanList | MessageKind::IgnoreList => {
            (text.to_string(), Theme::status_message())
        }
        MessageKind::Message
        | MessageKind::Notice
        | MessageKind::Error
        | MessageKind::Motd
        | MessageKind::Unhandled => (format!("• {}", text), Theme::status_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::message::ChannelKind;
    use crate::sync::condense::CondensedKind;
    use crate::testing::{channel, message, unit_of};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn rendered(channel: &Channel) -> Vec<String> {
        timeline_lines(channel, "%H:%M").iter().map(text).collect()
    }

    #[test]
    fn test_trailing_unread_marker_is_not_drawn() {
        let mut chan = channel(1, "#rust", ChannelKind::Channel);
        chan.timeline
            .push(Unit::Message(unit_of(&message(1, MessageKind::Message))));
        chan.timeline.move_marker_to_end();
        let lines = rendered(&chan);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("<alice> hello"));

        chan.timeline
            .push(Unit::Message(unit_of(&message(2, MessageKind::Message))));
        let lines = rendered(&chan);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "──── new messages ────");
    }

    #[test]
    fn test_hidden_units_and_show_more() {
        let mut chan = channel(1, "#rust", ChannelKind::Channel);
        chan.show_more = true;
        let mut join = unit_of(&message(1, MessageKind::Join));
        join.hidden = true;
        chan.timeline.push(Unit::Message(join));
        chan.timeline
            .push(Unit::DateMarker(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
        chan.timeline.move_marker_to_end();

        let lines = rendered(&chan);
        assert_eq!(
            lines,
            vec![
                "  ⋯ older messages were trimmed".to_string(),
                "──── Saturday, 17 October 2026 ────".to_string(),
            ]
        );
    }

    #[test]
    fn test_condensed_and_attachments() {
        let mut chan = channel(1, "#rust", ChannelKind::Channel);
        let join = unit_of(&message(1, MessageKind::Join));
        let mut group = CondensedGroup::new(join.clone(), CondensedKind::Join);
        group.push(join, CondensedKind::Join);
        group.push(unit_of(&message(3, MessageKind::Quit)), CondensedKind::Quit);
        chan.timeline.push(Unit::Condensed(group));

        let mut msg = unit_of(&message(4, MessageKind::Message));
        msg.attachments.push("[link] Example (https://example.com)".to_string());
        chan.timeline.push(Unit::Message(msg));
        chan.timeline.move_marker_to_end();

        let lines = rendered(&chan);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("⇄ 2 joined, 1 quit"));
        assert_eq!(lines[2], "    ↳ [link] Example (https://example.com)");
    }

    #[test]
    fn test_motd_spans_lines_and_formatting_is_stripped() {
        let mut motd = message(1, MessageKind::Motd);
        motd.text = "Welcome\n\x02Be nice\x02".to_string();
        let lines: Vec<String> = message_lines(&unit_of(&motd), "%H:%M").iter().map(text).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Welcome"));
        assert!(lines[1].trim_start().starts_with("Be nice"));

        let lines: Vec<String> = message_lines(&unit_of(&message(2, MessageKind::Join)), "%H:%M")
            .iter()
            .map(text)
            .collect();
        assert!(lines[0].ends_with("→ alice joined"));
    }
}
