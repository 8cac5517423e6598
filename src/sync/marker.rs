//! Placement of the per-channel unread marker.

use crate::sync::timeline::{Timeline, Unit};

/// Whether the marker should jump to the end after the latest unit was
/// placed. Own messages always move it. Otherwise it moves when the newest
/// unit is hidden and directly follows the marker, optionally with a date
/// marker in between.
pub fn should_relocate(timeline: &Timeline, self_authored: bool) -> bool {
    if self_authored {
        return true;
    }

    let units = timeline.units();
    let Some((last, rest)) = units.split_last() else {
        return false;
    };
    if !last.is_hidden() {
        return false;
    }

    match rest {
        [.., Unit::UnreadMarker { .. }] => true,
        [.., Unit::UnreadMarker { .. }, Unit::DateMarker(_)] => true,
        _ => false,
    }
}

/// Relocate the marker if needed; returns whether it moved.
pub fn reposition(timeline: &mut Timeline, self_authored: bool) -> bool {
    if should_relocate(timeline, self_authored) {
        timeline.move_marker_to_end();
        true
    } else {
        false
    }
}
