//! Bounded history per channel.

use crate::app::state::Channel;

/// Entries kept when a message lands in the active channel scrolled to the bottom.
pub const ACTIVE_LIMIT: usize = 500;
/// Entries kept in background channels.
pub const BACKGROUND_LIMIT: usize = 100;

/// Limit for a channel receiving a message; 0 means leave it alone so a
/// reader scrolled up keeps their position.
pub fn limit_for(is_active: bool, at_bottom: bool) -> usize {
    match (is_active, at_bottom) {
        (false, _) => BACKGROUND_LIMIT,
        (true, true) => ACTIVE_LIMIT,
        (true, false) => 0,
    }
}

/// Keep the newest `limit` entries, drop date markers left without messages
/// and flag that older history exists. Returns the number of entries removed.
pub fn trim(channel: &mut Channel, limit: usize) -> usize {
    let entries = channel.timeline.entry_count();
    if limit == 0 || entries <= limit {
        return 0;
    }

    let excess = entries - limit;
    channel.timeline.remove_oldest_entries(excess);
    channel.timeline.remove_stale_date_markers();
    channel.show_more = true;
    excess
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::message::{ChannelKind, MessageKind};
    use crate::sync::timeline::Unit;
    use crate::testing::{channel, message, unit_of};
    use chrono::NaiveDate;

    fn filled(count: i64) -> Channel {
        let mut chan = channel(1, "#rust", ChannelKind::Channel);
        for id in 1..=count {
            chan.timeline
                .push(Unit::Message(unit_of(&message(id, MessageKind::Message))));
        }
        chan
    }

    #[test]
    fn test_limit_policy() {
        assert_eq!(limit_for(true, true), 500);
        assert_eq!(limit_for(false, true), 100);
        assert_eq!(limit_for(false, false), 100);
        assert_eq!(limit_for(true, false), 0);
    }

    #[test]
    fn test_noop_under_limit() {
        let mut chan = filled(10);
        assert_eq!(trim(&mut chan, 10), 0);
        assert_eq!(trim(&mut chan, 0), 0);
        assert!(!chan.show_more);
    }

    #[test]
    fn test_trim_keeps_newest_and_is_idempotent() {
        let mut chan = filled(120);
        assert_eq!(trim(&mut chan, 100), 20);
        assert_eq!(chan.timeline.entry_count(), 100);
        assert!(chan.show_more);

        let first = chan.timeline.units().iter().find_map(|u| match u {
            Unit::Message(m) => Some(m.id),
            _ => None,
        });
        assert_eq!(first, Some(21));

        assert_eq!(trim(&mut chan, 100), 0);
        assert_eq!(chan.timeline.entry_count(), 100);
        assert_eq!(chan.timeline.marker_index(), Some(0));
    }

    #[test]
    fn test_trim_drops_dangling_date_markers() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 10, d).unwrap();
        let mut chan = channel(1, "#rust", ChannelKind::Channel);
        chan.timeline.push(Unit::DateMarker(day(15)));
        chan.timeline
            .push(Unit::Message(unit_of(&message(1, MessageKind::Message))));
        chan.timeline.push(Unit::DateMarker(day(16)));
        chan.timeline
            .push(Unit::Message(unit_of(&message(2, MessageKind::Message))));
        chan.timeline.push(Unit::DateMarker(day(17)));
        chan.timeline
            .push(Unit::Message(unit_of(&message(3, MessageKind::Message))));

        trim(&mut chan, 1);

        let units = chan.timeline.units();
        for pair in units.windows(2) {
            assert!(!(pair[0].is_date_marker() && pair[1].is_date_marker()));
        }
        assert_eq!(chan.timeline.entry_count(), 1);
        assert!(units.contains(&Unit::DateMarker(day(17))));
        assert!(!units.contains(&Unit::DateMarker(day(15))));
    }
}
