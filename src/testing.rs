//! Shared fixtures for unit tests.

use crate::app::message::{ChannelId, ChannelKind, Message, MessageId, MessageKind, Preview, Sender};
use crate::app::state::{AppState, Channel, Network};
use crate::config::AppConfig;
use crate::notify::surface::{DesktopNotification, DesktopSurface, NotifyError, Permission};
use crate::storage::MemoryStore;
use crate::sync::builder::{self, PreviewError, PreviewRenderer, TextPreviewRenderer};
use crate::sync::timeline::MessageUnit;
use crate::sync::Services;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// A message from "alice" at 2026-10-17 12:00 UTC.
pub fn message(id: MessageId, kind: MessageKind) -> Message {
    Message {
        id,
        kind,
        time: Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap(),
        text: "hello".to_string(),
        from: Sender {
            nick: "alice".to_string(),
        },
        self_authored: false,
        highlight: false,
        previews: Vec::new(),
        show_in_active: false,
        channel: None,
    }
}

pub fn unit_of(msg: &Message) -> MessageUnit {
    MessageUnit {
        id: msg.id,
        kind: msg.kind,
        time: msg.time,
        nick: msg.from.nick.clone(),
        text: msg.text.clone(),
        self_authored: msg.self_authored,
        highlight: msg.highlight,
        template: builder::template_for(msg.kind),
        hidden: false,
        attachments: Vec::new(),
    }
}

pub fn channel(id: ChannelId, name: &str, kind: ChannelKind) -> Channel {
    Channel::new(id, name.to_string(), kind)
}

pub fn network(uuid: &str, channels: Vec<Channel>) -> Network {
    Network {
        uuid: uuid.to_string(),
        name: uuid.to_string(),
        channels,
        collapsed: false,
    }
}

pub fn state_with(networks: Vec<Network>) -> AppState {
    let mut state = AppState::new(AppConfig::default());
    state.networks = networks;
    state
}

pub fn services() -> Services {
    Services {
        previews: Box::new(TextPreviewRenderer),
        surface: Arc::new(FakeSurface::granted(false)),
        store: Box::new(MemoryStore::default()),
    }
}

/// Records notifications instead of showing them.
pub struct FakeSurface {
    pub permission: Permission,
    pub persistent_available: bool,
    pub shown: Mutex<Vec<DesktopNotification>>,
    pub persistent: Mutex<Vec<DesktopNotification>>,
}

impl FakeSurface {
    pub fn granted(persistent_available: bool) -> Self {
        Self {
            permission: Permission::Granted,
            persistent_available,
            shown: Mutex::new(Vec::new()),
            persistent: Mutex::new(Vec::new()),
        }
    }
}

impl DesktopSurface for FakeSurface {
    fn is_available(&self) -> bool {
        true
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    fn has_persistent(&self) -> bool {
        self.persistent_available
    }

    fn show(&self, notification: &DesktopNotification) -> Result<(), NotifyError> {
        self.shown.lock().unwrap().push(notification.clone());
        Ok(())
    }

    fn post_persistent(&self, notification: &DesktopNotification) -> Result<(), NotifyError> {
        self.persistent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// A preview renderer that rejects everything.
pub struct FailingPreviews;

impl PreviewRenderer for FailingPreviews {
    fn attach(&self, preview: &Preview, _unit: &mut MessageUnit) -> Result<(), PreviewError> {
        Err(PreviewError {
            link: preview.link.clone(),
            reason: "renderer offline".to_string(),
        })
    }
}
