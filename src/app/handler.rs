use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::message::FeedEvent;
use crate::app::state::AppState;
use crate::sync::{self, Services};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

/// Lines moved by PageUp/PageDown.
const SCROLL_STEP: isize = 5;

pub fn handle_event(state: &mut AppState, services: &mut Services, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, services, cevent)
        }
        AppEvent::Feed(feed) => handle_feed(state, services, feed),
        AppEvent::FeedMalformed { message_id, error } => {
            if let Some(id) = message_id {
                state.advance_high_water(id);
            }
            debug!(?message_id, %error, "dropping malformed feed event");
            vec![]
        }
        AppEvent::FeedStatus(status) => {
            state.feed_status = status;
            state.dirty = true;
            vec![]
        }
        AppEvent::Tick => vec![],
    }
}

/// Reduce one feed event into the state. Events that no longer apply are
/// dropped and logged.
pub fn handle_feed(state: &mut AppState, services: &Services, event: FeedEvent) -> Vec<Action> {
    let result = match event {
        FeedEvent::Msg(msg) => sync::process_message(state, services, msg),
        FeedEvent::Init(init) => Ok(sync::init_networks(state, services, init)),
        FeedEvent::Join(join) => sync::join_channel(state, services, join),
        FeedEvent::Part(part) => sync::part_channel(state, part),
        FeedEvent::Names(names) => sync::set_names(state, names).map(|()| Vec::new()),
    };
    result.unwrap_or_else(|e| {
        debug!(error = %e, "dropping feed event");
        Vec::new()
    })
}

fn handle_terminal(state: &mut AppState, services: &mut Services, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) => handle_key(state, services, key),
        CEvent::FocusGained => {
            state.focused = true;
            state.alerted = false;
            vec![]
        }
        CEvent::FocusLost => {
            state.focused = false;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, services: &mut Services, key: KeyEvent) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => vec![Action::Quit],
        KeyCode::Char('q') => vec![Action::Quit],
        KeyCode::Tab | KeyCode::Down => switch_channel(state, 1),
        KeyCode::Char('n') if ctrl => switch_channel(state, 1),
        KeyCode::BackTab | KeyCode::Up => switch_channel(state, -1),
        KeyCode::Char('p') if ctrl => switch_channel(state, -1),
        KeyCode::PageUp => {
            state.scroll_active(SCROLL_STEP);
            vec![]
        }
        KeyCode::PageDown => {
            state.scroll_active(-SCROLL_STEP);
            vec![]
        }
        KeyCode::End => {
            state.scroll_active(isize::MIN);
            vec![]
        }
        KeyCode::Char('c') => {
            toggle_active_network(state, services);
            vec![]
        }
        _ => vec![],
    }
}

fn switch_channel(state: &mut AppState, delta: isize) -> Vec<Action> {
    if delta < 0 {
        state.select_prev_channel();
    } else {
        state.select_next_channel();
    }
    vec![Action::RefreshTitle]
}

fn toggle_active_network(state: &mut AppState, services: &mut Services) {
    let Some(uuid) = state
        .active
        .and_then(|id| state.network_of(id))
        .map(|n| n.uuid.clone())
    else {
        return;
    };
    if let Err(e) = sync::toggle_collapse(state, services.store.as_mut(), &uuid) {
        warn!(network = %uuid, error = %e, "failed to persist collapsed networks");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::message::{ChannelKind, MessageKind, MsgEvent};
    use crate::app::state::FeedStatus;
    use crate::storage::{self, COLLAPSED_KEY};
    use crate::testing::{channel, message, network, services, state_with};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn state() -> AppState {
        state_with(vec![network(
            "net-a",
            vec![
                channel(1, "libera", ChannelKind::Lobby),
                channel(2, "#rust", ChannelKind::Channel),
            ],
        )])
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state();
        let mut services = services();
        assert_eq!(
            handle_event(&mut state, &mut services, key(KeyCode::Char('q'))),
            vec![Action::Quit]
        );
        let ctrl_c = AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(
            handle_event(&mut state, &mut services, ctrl_c),
            vec![Action::Quit]
        );
    }

    #[test]
    fn test_navigation_clears_counters() {
        let mut state = state();
        let mut services = services();
        state.set_active_channel(1);
        state.channel_mut(2).unwrap().unread = 3;

        let actions = handle_event(&mut state, &mut services, key(KeyCode::Tab));
        assert_eq!(actions, vec![Action::RefreshTitle]);
        assert_eq!(state.active, Some(2));
        assert_eq!(state.channel(2).unwrap().unread, 0);

        handle_event(&mut state, &mut services, key(KeyCode::Up));
        assert_eq!(state.active, Some(1));
    }

    #[test]
    fn test_focus_tracking() {
        let mut state = state();
        let mut services = services();
        state.alerted = true;

        handle_event(&mut state, &mut services, AppEvent::Terminal(CEvent::FocusLost));
        assert!(!state.focused);
        assert!(state.alerted);

        handle_event(&mut state, &mut services, AppEvent::Terminal(CEvent::FocusGained));
        assert!(state.focused);
        assert!(!state.alerted);
    }

    #[test]
    fn test_collapse_key_persists() {
        let mut state = state();
        let mut services = services();
        state.set_active_channel(2);

        handle_event(&mut state, &mut services, key(KeyCode::Char('c')));

        assert!(state.networks[0].collapsed);
        assert_eq!(state.active, Some(1));
        assert!(services.store.get(COLLAPSED_KEY).is_some());
        assert!(storage::collapsed_networks(services.store.as_ref()).contains("net-a"));
    }

    #[test]
    fn test_malformed_and_missing_events_still_advance_high_water() {
        let mut state = state();
        let mut services = services();

        handle_event(
            &mut state,
            &mut services,
            AppEvent::FeedMalformed {
                message_id: Some(12),
                error: "missing field `time`".to_string(),
            },
        );
        assert_eq!(state.last_message_id, 12);

        let actions = handle_event(
            &mut state,
            &mut services,
            AppEvent::Feed(FeedEvent::Msg(MsgEvent {
                chan: 404,
                msg: message(20, MessageKind::Message),
                unread: 1,
                highlight: 0,
            })),
        );
        assert!(actions.is_empty());
        assert_eq!(state.last_message_id, 20);
    }

    #[test]
    fn test_feed_status_updates_state() {
        let mut state = state();
        let mut services = services();
        handle_event(
            &mut state,
            &mut services,
            AppEvent::FeedStatus(FeedStatus::Reconnecting { attempt: 2 }),
        );
        assert_eq!(state.feed_status, FeedStatus::Reconnecting { attempt: 2 });
        assert!(state.status_line().contains("attempt 2"));
    }
}
