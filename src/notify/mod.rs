//! Alerting decisions for incoming messages: bell, status marker, desktop
//! notification and sidebar badge.

pub mod format;
pub mod surface;

use crate::app::action::Action;
use crate::app::message::{ChannelKind, Message, MessageKind};
use crate::app::state::Channel;
use crate::config::model::NotificationsConfig;
use surface::{Delivery, DesktopNotification, DesktopSurface, Permission};

pub struct NotifyContext<'a> {
    pub settings: &'a NotificationsConfig,
    /// The terminal has input focus.
    pub focused: bool,
    /// The message landed in the active channel.
    pub is_active: bool,
    pub surface: &'a dyn DesktopSurface,
}

/// Decide how to alert for `msg` in `channel`, updating the channel's
/// counters and badge from the relay's numbers.
pub fn evaluate(
    channel: &mut Channel,
    msg: &Message,
    server_unread: u32,
    server_highlight: u32,
    ctx: &NotifyContext,
) -> Vec<Action> {
    let mut actions = Vec::new();

    if msg.self_authored {
        return actions;
    }

    let wants_alert = msg.highlight
        || (ctx.settings.notify_all_messages && msg.kind == MessageKind::Message);

    if wants_alert && (!ctx.focused || !ctx.is_active) {
        if ctx.settings.sound {
            actions.push(Action::PlaySound);
        }
        actions.push(Action::MarkAlerted);

        if ctx.settings.desktop
            && ctx.surface.is_available()
            && ctx.surface.permission() == Permission::Granted
        {
            let notification = compose(channel, msg);
            let delivery = if ctx.surface.has_persistent() {
                Delivery::Persistent(notification)
            } else {
                Delivery::Direct(notification)
            };
            actions.push(Action::Notify(delivery));
        }
    }

    if server_unread == 0 || ctx.is_active {
        return actions;
    }

    channel.unread = server_unread;
    channel.highlight = server_highlight;
    channel.refresh_badge(false);

    if msg.highlight {
        actions.push(Action::RefreshTitle);
    }

    actions
}

/// Title and body for a desktop notification.
pub fn compose(channel: &Channel, msg: &Message) -> DesktopNotification {
    let (title, body) = if msg.kind == MessageKind::Invite {
        (
            "New channel invite:".to_string(),
            format!(
                "{} invited you to {}",
                msg.from.nick,
                msg.channel.as_deref().unwrap_or(&channel.name)
            ),
        )
    } else {
        let mut title = msg.from.nick.clone();
        if channel.kind != ChannelKind::Query {
            title.push_str(&format!(" ({})", channel.name.trim()));
        }
        if msg.kind == MessageKind::Message {
            title.push_str(" says:");
        }
        (title, format::strip_formatting(&msg.text))
    };

    DesktopNotification {
        chan_id: channel.id,
        timestamp: msg.time.timestamp_millis(),
        title,
        body,
        tag: format!("chan-{}", channel.id),
    }
}
