//! Reconciles relay events into per-channel state.
//!
//! Every feed event is reduced here, one at a time and to completion. A
//! message flows through the builder, the condensing grouper, the unread
//! marker, the notification dispatcher and finally the trimming policy.

pub mod builder;
pub mod condense;
pub mod marker;
pub mod timeline;
pub mod trim;

use crate::app::action::Action;
use crate::app::message::{
    ChannelId, ChannelKind, ChannelPayload, InitEvent, JoinEvent, Message, MessageId, MsgEvent,
    NamesEvent, PartEvent,
};
use crate::app::state::{AppState, Channel, Network};
use crate::notify::surface::DesktopSurface;
use crate::notify::{self, NotifyContext};
use crate::storage::{self, StoreError, StringStore};
use builder::{BuildContext, PreviewRenderer};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Entry count from which a resumed channel offers older history.
const RESUME_SHOW_MORE: usize = 100;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("channel {0} not found")]
    ChannelNotFound(ChannelId),

    #[error("network {0} not found")]
    NetworkNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Collaborators the synchronizer calls out to.
pub struct Services {
    pub previews: Box<dyn PreviewRenderer>,
    pub surface: Arc<dyn DesktopSurface>,
    pub store: Box<dyn StringStore>,
}

/// Apply one `msg` event. The high-water mark advances even when the event
/// is dropped.
pub fn process_message(
    state: &mut AppState,
    services: &Services,
    event: MsgEvent,
) -> Result<Vec<Action>, SyncError> {
    let MsgEvent {
        chan,
        mut msg,
        unread,
        highlight,
    } = event;
    state.advance_high_water(msg.id);

    let (origin_net, origin_chan) = state.locate(chan).ok_or(SyncError::ChannelNotFound(chan))?;
    let mut actions = Vec::new();

    if msg.self_authored {
        state.networks[origin_net].channels[origin_chan].clear_counters();
        actions.push(Action::RefreshTitle);
    }

    let target = redirect_target(state, origin_net, chan, &msg);
    let (net, index) = state
        .locate(target)
        .ok_or(SyncError::ChannelNotFound(target))?;
    let is_active = state.is_active(target);
    let focused = state.focused;

    let ctx = BuildContext {
        highlights: state.highlights.as_ref(),
        previews: services.previews.as_ref(),
        status_messages: state.config.ui.status_messages,
    };
    let channel = &mut state.networks[net].channels[index];

    if is_duplicate(channel, msg.id) {
        debug!(channel = target, message_id = msg.id, "dropping duplicate message");
        return Ok(actions);
    }

    if msg.kind.is_list_refresh() {
        channel.timeline.clear();
    }

    append_message(channel, &mut msg, &ctx);
    marker::reposition(&mut channel.timeline, msg.self_authored);

    let notify_ctx = NotifyContext {
        settings: &state.config.notifications,
        focused,
        is_active,
        surface: services.surface.as_ref(),
    };
    actions.extend(notify::evaluate(channel, &msg, unread, highlight, &notify_ctx));

    let limit = trim::limit_for(is_active, channel.is_scrolled_to_bottom());
    trim::trim(channel, limit);

    if msg.kind.is_speech() && channel.kind == ChannelKind::Channel {
        channel.promote_nick(&msg.from.nick);
    }

    state.dirty = true;
    Ok(actions)
}

// Connection-scoped notices follow the user into the active channel when it
// belongs to the same network.
fn redirect_target(state: &AppState, net: usize, chan: ChannelId, msg: &Message) -> ChannelId {
    if !msg.show_in_active {
        return chan;
    }
    match state.active {
        Some(active) if state.networks[net].channels.iter().any(|c| c.id == active) => active,
        _ => chan,
    }
}

fn is_duplicate(channel: &Channel, id: MessageId) -> bool {
    channel.newest_id.is_some_and(|newest| id <= newest)
}

/// Date marker, built unit and condensing for one message.
fn append_message(channel: &mut Channel, msg: &mut Message, ctx: &BuildContext) {
    if let Some(marker) = builder::date_marker_for(&channel.timeline, msg) {
        channel.timeline.push(marker);
    }
    let unit = builder::build_message(msg, ctx);
    condense::place(&mut channel.timeline, unit, channel.kind, ctx.status_messages);
    channel.newest_id = Some(msg.id);
}

/// Build a channel from its payload. Returns the channel and the largest
/// message id it holds.
fn build_channel(payload: ChannelPayload, ctx: &BuildContext) -> (Channel, Option<MessageId>) {
    let mut channel = Channel::new(payload.id, payload.name, payload.kind);
    channel.users_outdated = payload.kind == ChannelKind::Channel;
    channel.unread = payload.unread;
    channel.highlight = payload.highlight;
    channel.nicks = payload.users;

    let mut newest = None;
    for mut msg in payload.messages {
        newest = newest.max(Some(msg.id));
        if is_duplicate(&channel, msg.id) {
            continue;
        }
        append_message(&mut channel, &mut msg, ctx);
    }

    match payload.first_unread {
        Some(first_unread) => channel.timeline.place_marker_before(first_unread),
        None => channel.timeline.move_marker_to_end(),
    }

    (channel, newest)
}

/// Refresh a channel that survived a reconnect. Its history stays; only
/// messages newer than what it already shows are appended.
fn resume_channel(
    mut channel: Channel,
    payload: ChannelPayload,
    ctx: &BuildContext,
) -> (Channel, Option<MessageId>) {
    channel.name = payload.name;
    channel.unread = payload.unread;
    channel.highlight = payload.highlight;
    channel.users_outdated = payload.kind == ChannelKind::Channel;
    if !payload.users.is_empty() {
        channel.nicks = payload.users;
    }

    let had_messages = !payload.messages.is_empty();
    let mut newest = None;
    for mut msg in payload.messages {
        newest = newest.max(Some(msg.id));
        if !is_duplicate(&channel, msg.id) {
            append_message(&mut channel, &mut msg, ctx);
        }
    }

    if had_messages && channel.timeline.entry_count() >= RESUME_SHOW_MORE {
        channel.show_more = true;
    }

    (channel, newest)
}

/// Replace the network list with the relay's snapshot.
pub fn init_networks(state: &mut AppState, services: &Services, event: InitEvent) -> Vec<Action> {
    let collapsed = storage::collapsed_networks(services.store.as_ref());
    let resuming = state.last_message_id > -1;

    let mut previous: HashMap<ChannelId, Channel> = std::mem::take(&mut state.networks)
        .into_iter()
        .flat_map(|n| n.channels)
        .map(|c| (c.id, c))
        .collect();

    let ctx = BuildContext {
        highlights: state.highlights.as_ref(),
        previews: services.previews.as_ref(),
        status_messages: state.config.ui.status_messages,
    };

    let mut newest: Option<MessageId> = None;
    let mut networks = Vec::with_capacity(event.networks.len());
    for payload in event.networks {
        let mut channels = Vec::with_capacity(payload.channels.len());
        for chan in payload.channels {
            let (channel, chan_newest) = match previous.remove(&chan.id) {
                Some(existing) if resuming => resume_channel(existing, chan, &ctx),
                _ => build_channel(chan, &ctx),
            };
            newest = newest.max(chan_newest);
            channels.push(channel);
        }
        networks.push(Network {
            collapsed: collapsed.contains(&payload.uuid),
            uuid: payload.uuid,
            name: payload.name,
            channels,
        });
    }

    state.networks = networks;
    if let Some(id) = newest {
        state.advance_high_water(id);
    }

    let active = event
        .active
        .filter(|id| state.channel(*id).is_some())
        .or_else(|| state.active.filter(|id| state.channel(*id).is_some()))
        .or_else(|| state.visible_channels().first().copied());
    state.active = None;
    if let Some(id) = active {
        state.set_active_channel(id);
    }

    let active = state.active;
    for channel in state.networks.iter_mut().flat_map(|n| n.channels.iter_mut()) {
        channel.refresh_badge(active == Some(channel.id));
    }

    let mut actions = vec![Action::RefreshTitle];
    if state.total_highlights() > 0 {
        actions.push(Action::MarkAlerted);
    }
    state.dirty = true;
    actions
}

/// Add a channel the relay announced on a network.
pub fn join_channel(
    state: &mut AppState,
    services: &Services,
    event: JoinEvent,
) -> Result<Vec<Action>, SyncError> {
    let JoinEvent {
        network,
        chan,
        index,
        should_open,
    } = event;

    let net = state
        .networks
        .iter()
        .position(|n| n.uuid == network)
        .ok_or(SyncError::NetworkNotFound(network))?;

    if state.channel(chan.id).is_some() {
        debug!(channel = chan.id, "channel already known, ignoring join");
        return Ok(Vec::new());
    }

    let ctx = BuildContext {
        highlights: state.highlights.as_ref(),
        previews: services.previews.as_ref(),
        status_messages: state.config.ui.status_messages,
    };
    let (mut channel, newest) = build_channel(chan, &ctx);
    let id = channel.id;
    channel.refresh_badge(false);

    let channels = &mut state.networks[net].channels;
    let at = index.unwrap_or(channels.len()).min(channels.len());
    channels.insert(at, channel);

    if let Some(newest) = newest {
        state.advance_high_water(newest);
    }
    if should_open {
        state.set_active_channel(id);
    }
    state.dirty = true;
    Ok(vec![Action::RefreshTitle])
}

/// Remove a channel the user left. Leaving the active channel falls back
/// to the network lobby.
pub fn part_channel(state: &mut AppState, event: PartEvent) -> Result<Vec<Action>, SyncError> {
    let (net, index) = state
        .locate(event.chan)
        .ok_or(SyncError::ChannelNotFound(event.chan))?;
    state.networks[net].channels.remove(index);

    if state.is_active(event.chan) {
        state.active = None;
        if let Some(lobby) = state.networks[net].lobby().map(|c| c.id) {
            state.set_active_channel(lobby);
        }
    }
    state.dirty = true;
    Ok(vec![Action::RefreshTitle])
}

/// Replace the member list of a channel.
pub fn set_names(state: &mut AppState, event: NamesEvent) -> Result<(), SyncError> {
    let channel = state
        .channel_mut(event.id)
        .ok_or(SyncError::ChannelNotFound(event.id))?;
    channel.nicks = event.users;
    channel.users_outdated = false;
    state.dirty = true;
    Ok(())
}

/// Flip the collapsed state of a network and persist the collapsed set.
/// Collapsing the network holding the active channel activates its lobby.
/// Returns the new state.
pub fn toggle_collapse(
    state: &mut AppState,
    store: &mut dyn StringStore,
    uuid: &str,
) -> Result<bool, SyncError> {
    let net = state
        .networks
        .iter()
        .position(|n| n.uuid == uuid)
        .ok_or_else(|| SyncError::NetworkNotFound(uuid.to_string()))?;

    let network = &mut state.networks[net];
    network.collapsed = !network.collapsed;
    let collapsed = network.collapsed;

    let holds_active = state
        .active
        .is_some_and(|id| network.channels.iter().any(|c| c.id == id));
    if collapsed && holds_active {
        if let Some(lobby) = network.lobby().map(|c| c.id) {
            state.set_active_channel(lobby);
        }
    }
    state.dirty = true;

    storage::set_collapsed(store, uuid, collapsed)?;
    Ok(collapsed)
}
