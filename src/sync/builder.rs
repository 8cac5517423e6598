//! Turns wire messages into timeline units.

use crate::app::message::{Message, MessageKind, Preview};
use crate::config::highlight::HighlightMatcher;
use crate::config::model::StatusMessages;
use crate::sync::condense::CondensedKind;
use crate::sync::timeline::{local_date, MessageUnit, Template, Timeline, Unit};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("preview for {link} could not be rendered: {reason}")]
pub struct PreviewError {
    pub link: String,
    pub reason: String,
}

/// Attaches preview content to an already built unit.
pub trait PreviewRenderer {
    fn attach(&self, preview: &Preview, unit: &mut MessageUnit) -> Result<(), PreviewError>;
}

/// Renders previews as a single descriptive line under the message.
pub struct TextPreviewRenderer;

impl PreviewRenderer for TextPreviewRenderer {
    fn attach(&self, preview: &Preview, unit: &mut MessageUnit) -> Result<(), PreviewError> {
        if preview.link.is_empty() {
            return Err(PreviewError {
                link: preview.link.clone(),
                reason: "missing link".to_string(),
            });
        }
        let line = match (preview.head.trim(), preview.body.trim()) {
            ("", _) => format!("[{}] {}", preview.kind, preview.link),
            (head, "") => format!("[{}] {} ({})", preview.kind, head, preview.link),
            (head, body) => format!("[{}] {}: {} ({})", preview.kind, head, body, preview.link),
        };
        unit.attachments.push(line);
        Ok(())
    }
}

pub struct BuildContext<'a> {
    pub highlights: Option<&'a HighlightMatcher>,
    pub previews: &'a dyn PreviewRenderer,
    pub status_messages: StatusMessages,
}

/// The template each message kind is drawn with.
pub fn template_for(kind: MessageKind) -> Template {
    match kind {
        MessageKind::Message | MessageKind::Notice | MessageKind::Error => Template::Message,
        MessageKind::Unhandled => Template::Unhandled,
        MessageKind::Action
        | MessageKind::Motd
        | MessageKind::ChannelList
        | MessageKind::BanList
        | MessageKind::IgnoreList
        | MessageKind::Invite
        | MessageKind::Join
        | MessageKind::Part
        | MessageKind::Quit
        | MessageKind::Kick
        | MessageKind::Nick
        | MessageKind::Mode
        | MessageKind::ModeChannel
        | MessageKind::Away
        | MessageKind::Back
        | MessageKind::Chghost
        | MessageKind::Topic
        | MessageKind::TopicSetBy
        | MessageKind::Ctcp
        | MessageKind::CtcpRequest
        | MessageKind::Whois => Template::Action(kind),
    }
}

/// Sets `msg.highlight` when a configured highlight word appears in a
/// message or notice that the relay did not already flag.
pub fn apply_highlight(msg: &mut Message, highlights: Option<&HighlightMatcher>) {
    if msg.highlight || msg.self_authored {
        return;
    }
    if !matches!(msg.kind, MessageKind::Message | MessageKind::Notice) {
        return;
    }
    if highlights.is_some_and(|re| re.is_match(&msg.text)) {
        msg.highlight = true;
    }
}

/// Strip the conventional `- ` prefix from MOTD lines when every non-empty
/// line carries it, then trim blank lines around the body.
pub fn reformat_motd(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let hyphenated = lines.iter().all(|line| line.is_empty() || line.starts_with('-'));
    let lines: Vec<&str> = if hyphenated {
        lines
            .into_iter()
            .map(|line| {
                line.char_indices()
                    .nth(2)
                    .map(|(i, _)| &line[i..])
                    .unwrap_or("")
            })
            .collect()
    } else {
        lines
    };
    lines.join("\n").trim().to_string()
}

/// Build the unit for `msg`. Highlight detection runs first so everything
/// downstream sees the final flag.
pub fn build_message(msg: &mut Message, ctx: &BuildContext) -> MessageUnit {
    apply_highlight(msg, ctx.highlights);

    if msg.kind == MessageKind::Motd {
        msg.text = reformat_motd(&msg.text);
    }

    let hidden = ctx.status_messages == StatusMessages::Hidden
        && CondensedKind::from_message(msg.kind).is_some();

    let mut unit = MessageUnit {
        id: msg.id,
        kind: msg.kind,
        time: msg.time,
        nick: msg.from.nick.clone(),
        text: msg.text.clone(),
        self_authored: msg.self_authored,
        highlight: msg.highlight,
        template: template_for(msg.kind),
        hidden,
        attachments: Vec::new(),
    };

    for preview in &msg.previews {
        if let Err(e) = ctx.previews.attach(preview, &mut unit) {
            debug!(message_id = msg.id, error = %e, "skipping preview");
        }
    }

    unit
}

/// A date marker for `msg` when its calendar date differs from the last
/// dated unit, or when the channel shows nothing dated yet.
pub fn date_marker_for(timeline: &Timeline, msg: &Message) -> Option<Unit> {
    let date = local_date(msg.time);
    match timeline.last_date() {
        Some(previous) if previous == date => None,
        _ => Some(Unit::DateMarker(date)),
    }
}
