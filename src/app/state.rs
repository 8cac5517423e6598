use crate::app::message::{ChannelId, ChannelKind, MessageId};
use crate::config::highlight::HighlightMatcher;
use crate::config::AppConfig;
use crate::notify::format::round_badge_number;
use crate::sync::timeline::Timeline;

pub const APP_NAME: &str = "crablounge";

/// Sidebar badge for a background channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub highlight: bool,
}

#[derive(Debug, Clone)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelKind,
    pub timeline: Timeline,
    pub unread: u32,
    pub highlight: u32,
    pub badge: Option<Badge>,
    pub users_outdated: bool,
    /// Member nicks, most recent speaker first.
    pub nicks: Vec<String>,
    /// Lines scrolled up from the bottom; 0 means pinned to the bottom.
    pub scroll_offset: usize,
    /// Older history was trimmed away.
    pub show_more: bool,
    /// Newest message id appended to this channel.
    pub newest_id: Option<MessageId>,
}

impl Channel {
    pub fn new(id: ChannelId, name: String, kind: ChannelKind) -> Self {
        Self {
            id,
            name,
            kind,
            timeline: Timeline::new(),
            unread: 0,
            highlight: 0,
            badge: None,
            users_outdated: false,
            nicks: Vec::new(),
            scroll_offset: 0,
            show_more: false,
            newest_id: None,
        }
    }

    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scroll_offset == 0
    }

    pub fn clear_counters(&mut self) {
        self.unread = 0;
        self.highlight = 0;
        self.badge = None;
    }

    /// Rebuild the badge from the counters; active channels carry none.
    pub fn refresh_badge(&mut self, is_active: bool) {
        self.badge = if self.unread > 0 && !is_active {
            Some(Badge {
                text: round_badge_number(self.unread),
                highlight: self.highlight > 0,
            })
        } else {
            None
        };
    }

    /// Move `nick` to the front of the member list if it is tracked.
    pub fn promote_nick(&mut self, nick: &str) {
        if let Some(pos) = self.nicks.iter().position(|n| n == nick) {
            let nick = self.nicks.remove(pos);
            self.nicks.insert(0, nick);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Network {
    pub uuid: String,
    pub name: String,
    pub channels: Vec<Channel>,
    pub collapsed: bool,
}

impl Network {
    pub fn lobby(&self) -> Option<&Channel> {
        self.channels
            .iter()
            .find(|c| c.kind == ChannelKind::Lobby)
            .or_else(|| self.channels.first())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
    Disconnected(String),
}

pub struct AppState {
    pub config: AppConfig,
    pub highlights: Option<HighlightMatcher>,
    pub networks: Vec<Network>,
    pub active: Option<ChannelId>,
    /// Whether the terminal has input focus.
    pub focused: bool,
    /// Largest message id seen, -1 before the first one.
    pub last_message_id: MessageId,
    /// Unseen highlight marker shown in the status bar.
    pub alerted: bool,
    pub feed_status: FeedStatus,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let highlights = HighlightMatcher::from_words(&config.highlights);
        Self {
            config,
            highlights,
            networks: Vec::new(),
            active: None,
            focused: true,
            last_message_id: -1,
            alerted: false,
            feed_status: FeedStatus::Connecting,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn advance_high_water(&mut self, id: MessageId) {
        self.last_message_id = self.last_message_id.max(id);
    }

    /// Network and channel index of a channel.
    pub fn locate(&self, id: ChannelId) -> Option<(usize, usize)> {
        self.networks.iter().enumerate().find_map(|(ni, net)| {
            net.channels
                .iter()
                .position(|c| c.id == id)
                .map(|ci| (ni, ci))
        })
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.locate(id)
            .map(|(ni, ci)| &self.networks[ni].channels[ci])
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.locate(id)
            .map(move |(ni, ci)| &mut self.networks[ni].channels[ci])
    }

    pub fn network_of(&self, id: ChannelId) -> Option<&Network> {
        self.locate(id).map(|(ni, _)| &self.networks[ni])
    }

    pub fn active_channel(&self) -> Option<&Channel> {
        self.active.and_then(|id| self.channel(id))
    }

    pub fn is_active(&self, id: ChannelId) -> bool {
        self.active == Some(id)
    }

    /// Switch to a channel, clearing its counters.
    pub fn set_active_channel(&mut self, id: ChannelId) {
        if let Some(chan) = self.channel_mut(id) {
            chan.clear_counters();
            self.active = Some(id);
            self.dirty = true;
        }
    }

    pub fn total_highlights(&self) -> u32 {
        self.networks
            .iter()
            .flat_map(|n| n.channels.iter())
            .map(|c| c.highlight)
            .sum()
    }

    /// Terminal title: app name, prefixed with the highlight total if any.
    pub fn window_title(&self) -> String {
        match self.total_highlights() {
            0 => APP_NAME.to_string(),
            n => format!("({}) {}", n, APP_NAME),
        }
    }

    /// Channels reachable from the sidebar, in display order. Collapsed
    /// networks only expose their lobby.
    pub fn visible_channels(&self) -> Vec<ChannelId> {
        let mut ids = Vec::new();
        for net in &self.networks {
            if net.collapsed {
                if let Some(lobby) = net.lobby() {
                    ids.push(lobby.id);
                }
            } else {
                ids.extend(net.channels.iter().map(|c| c.id));
            }
        }
        ids
    }

    pub fn select_next_channel(&mut self) {
        self.step_channel(1);
    }

    pub fn select_prev_channel(&mut self) {
        self.step_channel(-1);
    }

    fn step_channel(&mut self, delta: isize) {
        let ids = self.visible_channels();
        if ids.is_empty() {
            return;
        }
        let len = ids.len() as isize;
        let next = match self.active.and_then(|a| ids.iter().position(|&id| id == a)) {
            Some(current) => (current as isize + delta).rem_euclid(len) as usize,
            None => 0,
        };
        self.set_active_channel(ids[next]);
    }

    /// Scroll the active channel; positive values move away from the bottom.
    pub fn scroll_active(&mut self, delta: isize) {
        let Some(id) = self.active else { return };
        if let Some(chan) = self.channel_mut(id) {
            let max_scroll = chan.timeline.len().saturating_sub(1);
            chan.scroll_offset = chan.scroll_offset.saturating_add_signed(delta).min(max_scroll);
            self.dirty = true;
        }
    }

    pub fn status_line(&self) -> String {
        let feed = match &self.feed_status {
            FeedStatus::Connecting => "Connecting…".to_string(),
            FeedStatus::Connected => "Connected".to_string(),
            FeedStatus::Reconnecting { attempt } => {
                format!("Reconnecting… (attempt {})", attempt)
            }
            FeedStatus::Disconnected(reason) => format!("Waiting to reconnect… ({})", reason),
        };
        let channels: usize = self.networks.iter().map(|n| n.channels.len()).sum();
        format!(
            "{} | Networks: {} | Channels: {}",
            feed,
            self.networks.len(),
            channels
        )
    }
}
