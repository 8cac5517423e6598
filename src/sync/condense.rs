//! Condensing of consecutive status events (joins, parts, mode changes...)
//! into a single summarized group.

use crate::app::message::{ChannelKind, MessageKind};
use crate::config::model::StatusMessages;
use crate::sync::timeline::{CondensedGroup, MessageUnit, Timeline, Unit};

/// Status events that can be folded into a condensed group. The variant
/// order is the order used in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CondensedKind {
    Join,
    Part,
    Quit,
    Kick,
    Nick,
    Mode,
    Away,
    Back,
    Chghost,
}

impl CondensedKind {
    pub fn from_message(kind: MessageKind) -> Option<Self> {
        match kind {
            MessageKind::Join => Some(CondensedKind::Join),
            MessageKind::Part => Some(CondensedKind::Part),
            MessageKind::Quit => Some(CondensedKind::Quit),
            MessageKind::Kick => Some(CondensedKind::Kick),
            MessageKind::Nick => Some(CondensedKind::Nick),
            MessageKind::Mode => Some(CondensedKind::Mode),
            MessageKind::Away => Some(CondensedKind::Away),
            MessageKind::Back => Some(CondensedKind::Back),
            MessageKind::Chghost => Some(CondensedKind::Chghost),
            MessageKind::Message
            | MessageKind::Action
            | MessageKind::Notice
            | MessageKind::Error
            | MessageKind::Motd
            | MessageKind::ChannelList
            | MessageKind::BanList
            | MessageKind::IgnoreList
            | MessageKind::Invite
            | MessageKind::ModeChannel
            | MessageKind::Topic
            | MessageKind::TopicSetBy
            | MessageKind::Ctcp
            | MessageKind::CtcpRequest
            | MessageKind::Whois
            | MessageKind::Unhandled => None,
        }
    }

    pub fn describe(self, count: usize) -> String {
        match self {
            CondensedKind::Join => format!("{} joined", count),
            CondensedKind::Part => format!("{} left", count),
            CondensedKind::Quit => format!("{} quit", count),
            CondensedKind::Kick => format!("{} kicked", count),
            CondensedKind::Nick => format!("{} changed nick", count),
            CondensedKind::Mode if count == 1 => "1 mode change".to_string(),
            CondensedKind::Mode => format!("{} mode changes", count),
            CondensedKind::Away => format!("{} went away", count),
            CondensedKind::Back => format!("{} came back", count),
            CondensedKind::Chghost => format!("{} changed host", count),
        }
    }
}

/// Append `unit` to the timeline, folding it into a condensed group when
/// the channel, the status-message mode and the message itself allow it.
pub fn place(
    timeline: &mut Timeline,
    unit: MessageUnit,
    channel_kind: ChannelKind,
    mode: StatusMessages,
) {
    let condensable = if mode == StatusMessages::Condensed
        && channel_kind == ChannelKind::Channel
        && !unit.self_authored
        && !unit.highlight
    {
        CondensedKind::from_message(unit.kind)
    } else {
        None
    };

    let Some(kind) = condensable else {
        timeline.push(Unit::Message(unit));
        return;
    };

    // Only a trailing group absorbs the message; an unread marker after a
    // group starts a new one.
    if let Some(Unit::Condensed(group)) = timeline.last_mut() {
        group.push(unit, kind);
        return;
    }

    timeline.push(Unit::Condensed(CondensedGroup::new(unit, kind)));
}
