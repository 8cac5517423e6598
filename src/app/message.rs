//! Wire model for the relay event feed.
//!
//! Everything here derives `Deserialize` and mirrors the JSON the relay
//! sends. Unknown message types fall back to [`MessageKind::Unhandled`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

pub type ChannelId = i64;
pub type MessageId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Message,
    Action,
    Notice,
    Error,
    Motd,
    ChannelList,
    BanList,
    IgnoreList,
    Invite,
    Join,
    Part,
    Quit,
    Kick,
    Nick,
    Mode,
    ModeChannel,
    Away,
    Back,
    Chghost,
    Topic,
    TopicSetBy,
    Ctcp,
    CtcpRequest,
    Whois,
    #[serde(other)]
    Unhandled,
}

impl MessageKind {
    /// List replies replace the channel contents instead of appending.
    pub fn is_list_refresh(self) -> bool {
        matches!(
            self,
            MessageKind::ChannelList | MessageKind::BanList | MessageKind::IgnoreList
        )
    }

    /// Kinds that count as someone speaking in a channel.
    pub fn is_speech(self) -> bool {
        matches!(self, MessageKind::Message | MessageKind::Action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Lobby,
    Channel,
    Query,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub nick: String,
}

/// Link or media metadata attached by the relay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preview {
    pub link: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub head: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub thumb: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub from: Sender,
    #[serde(rename = "self", default)]
    pub self_authored: bool,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub previews: Vec<Preview>,
    #[serde(rename = "showInActive", default)]
    pub show_in_active: bool,
    /// Target channel of an invite.
    #[serde(default)]
    pub channel: Option<String>,
}

/// A new message for a channel, with the relay's counters after it.
#[derive(Debug, Clone, Deserialize)]
pub struct MsgEvent {
    pub chan: ChannelId,
    pub msg: Message,
    #[serde(default)]
    pub unread: u32,
    #[serde(default, deserialize_with = "count_or_flag")]
    pub highlight: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelPayload {
    pub id: ChannelId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub unread: u32,
    #[serde(default, deserialize_with = "count_or_flag")]
    pub highlight: u32,
    #[serde(rename = "firstUnread", default)]
    pub first_unread: Option<MessageId>,
    #[serde(default)]
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkPayload {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub channels: Vec<ChannelPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitEvent {
    pub networks: Vec<NetworkPayload>,
    #[serde(default)]
    pub active: Option<ChannelId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinEvent {
    pub network: String,
    pub chan: ChannelPayload,
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(rename = "shouldOpen", default)]
    pub should_open: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartEvent {
    pub chan: ChannelId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamesEvent {
    pub id: ChannelId,
    pub users: Vec<String>,
}

/// One line of the relay feed: `{"event": "...", "data": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum FeedEvent {
    Msg(MsgEvent),
    Init(InitEvent),
    Join(JoinEvent),
    Part(PartEvent),
    Names(NamesEvent),
}

// Older relays send `highlight` as a flag, newer ones as a count.
fn count_or_flag<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CountOrFlag {
        Count(u32),
        Flag(bool),
    }

    Ok(match CountOrFlag::deserialize(deserializer)? {
        CountOrFlag::Count(n) => n,
        CountOrFlag::Flag(flag) => u32::from(flag),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_event_from_json() {
        let raw = r#"{
            "chan": 7,
            "unread": 5,
            "highlight": true,
            "msg": {
                "id": 42,
                "type": "message",
                "time": "2026-10-17T12:00:00Z",
                "text": "hello",
                "from": {"nick": "alice"},
                "self": false,
                "showInActive": true,
                "previews": [{"link": "https://example.com", "type": "link", "head": "Example"}]
            }
        }"#;
        let event: MsgEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.chan, 7);
        assert_eq!(event.unread, 5);
        assert_eq!(event.highlight, 1);
        assert_eq!(event.msg.kind, MessageKind::Message);
        assert_eq!(event.msg.from.nick, "alice");
        assert!(event.msg.show_in_active);
        assert_eq!(event.msg.previews.len(), 1);
        assert_eq!(event.msg.previews[0].head, "Example");
    }

    #[test]
    fn test_unknown_type_is_unhandled() {
        let raw = r#"{"id": 1, "type": "something_new", "time": "2026-10-17T12:00:00Z"}"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.kind, MessageKind::Unhandled);
        assert!(!msg.self_authored);
        assert!(msg.text.is_empty());
    }

    #[test]
    fn test_feed_event_tagging() {
        let raw = r#"{"event": "names", "data": {"id": 3, "users": ["bob", "carol"]}}"#;
        match serde_json::from_str::<FeedEvent>(raw).unwrap() {
            FeedEvent::Names(names) => {
                assert_eq!(names.id, 3);
                assert_eq!(names.users, vec!["bob", "carol"]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_highlight_count() {
        let raw = r##"{"id": 1, "name": "#rust", "type": "channel", "highlight": 4}"##;
        let chan: ChannelPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(chan.highlight, 4);
        assert_eq!(chan.kind, ChannelKind::Channel);
        assert!(chan.messages.is_empty());
    }
}
