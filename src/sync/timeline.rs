//! The rendered history of a channel.
//!
//! A [`Timeline`] is the queryable model the UI projects: message units,
//! date markers, condensed groups and exactly one unread marker. The marker is
//! created with the timeline and can only be moved, never removed.

use crate::app::message::{MessageId, MessageKind};
use crate::sync::condense::CondensedKind;
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Which template the UI uses to draw a message unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Message,
    Action(MessageKind),
    Unhandled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageUnit {
    pub id: MessageId,
    pub kind: MessageKind,
    pub time: DateTime<Utc>,
    pub nick: String,
    pub text: String,
    pub self_authored: bool,
    pub highlight: bool,
    pub template: Template,
    /// Suppressed status line (status messages set to hidden).
    pub hidden: bool,
    /// Preview lines attached by the preview renderer.
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CondensedGroup {
    pub time: DateTime<Utc>,
    pub messages: Vec<MessageUnit>,
    counts: BTreeMap<CondensedKind, usize>,
}

impl CondensedGroup {
    pub fn new(unit: MessageUnit, kind: CondensedKind) -> Self {
        let mut group = Self {
            time: unit.time,
            messages: Vec::new(),
            counts: BTreeMap::new(),
        };
        group.push(unit, kind);
        group
    }

    pub fn push(&mut self, unit: MessageUnit, kind: CondensedKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
        self.messages.push(unit);
    }

    #[cfg(test)]
    pub fn count(&self, kind: CondensedKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Per-kind tally, e.g. `3 joined, 1 left`.
    pub fn summary(&self) -> String {
        self.counts
            .iter()
            .map(|(kind, count)| kind.describe(*count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Message(MessageUnit),
    DateMarker(NaiveDate),
    Condensed(CondensedGroup),
    UnreadMarker { unread_id: MessageId },
}

impl Unit {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Unit::Message(m) if m.hidden)
    }

    /// Messages and condensed groups; these are what trimming counts.
    pub fn is_entry(&self) -> bool {
        matches!(self, Unit::Message(_) | Unit::Condensed(_))
    }

    pub fn is_date_marker(&self) -> bool {
        matches!(self, Unit::DateMarker(_))
    }

    pub fn is_unread_marker(&self) -> bool {
        matches!(self, Unit::UnreadMarker { .. })
    }

    /// Calendar date shown by this unit, if it carries one.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Unit::Message(m) => Some(local_date(m.time)),
            Unit::Condensed(g) => Some(local_date(g.time)),
            Unit::DateMarker(date) => Some(*date),
            Unit::UnreadMarker { .. } => None,
        }
    }

    /// Newest message id carried by this unit.
    fn newest_id(&self) -> Option<MessageId> {
        match self {
            Unit::Message(m) => Some(m.id),
            Unit::Condensed(g) => g.messages.iter().map(|m| m.id).max(),
            _ => None,
        }
    }
}

pub fn local_date(time: DateTime<Utc>) -> NaiveDate {
    time.with_timezone(&Local).date_naive()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    units: Vec<Unit>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            units: vec![Unit::UnreadMarker { unread_id: 0 }],
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Unit> {
        self.units.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Unit> {
        self.units.last_mut()
    }

    pub fn push(&mut self, unit: Unit) {
        debug_assert!(!unit.is_unread_marker());
        self.units.push(unit);
    }

    pub fn entry_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_entry()).count()
    }

    /// Date of the last unit that shows one. The unread marker is skipped.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.units.iter().rev().find_map(Unit::date)
    }

    #[cfg(test)]
    pub fn marker_index(&self) -> Option<usize> {
        self.units.iter().position(Unit::is_unread_marker)
    }

    #[cfg(test)]
    pub fn marker_unread_id(&self) -> Option<MessageId> {
        self.units.iter().find_map(|u| match u {
            Unit::UnreadMarker { unread_id } => Some(*unread_id),
            _ => None,
        })
    }

    /// Move the unread marker to the end and reset its unread id.
    pub fn move_marker_to_end(&mut self) {
        self.units.retain(|u| !u.is_unread_marker());
        self.units.push(Unit::UnreadMarker { unread_id: 0 });
    }

    /// Put the marker in front of the first unit holding `first_unread` or a
    /// newer message; at the end when everything is read.
    pub fn place_marker_before(&mut self, first_unread: MessageId) {
        self.units.retain(|u| !u.is_unread_marker());
        let index = self
            .units
            .iter()
            .position(|u| u.newest_id().is_some_and(|id| id >= first_unread))
            .unwrap_or(self.units.len());
        self.units.insert(
            index,
            Unit::UnreadMarker {
                unread_id: first_unread,
            },
        );
    }

    /// Drop everything except the unread marker.
    pub fn clear(&mut self) {
        self.units.clear();
        self.units.push(Unit::UnreadMarker { unread_id: 0 });
    }

    /// Remove the oldest `count` entries, leaving markers in place.
    pub(crate) fn remove_oldest_entries(&mut self, count: usize) {
        let mut remaining = count;
        self.units.retain(|u| {
            if remaining > 0 && u.is_entry() {
                remaining -= 1;
                false
            } else {
                true
            }
        });
    }

    /// Remove date markers that are directly followed by another date marker.
    pub(crate) fn remove_stale_date_markers(&mut self) -> usize {
        let stale: Vec<bool> = (0..self.units.len())
            .map(|i| {
                self.units[i].is_date_marker()
                    && self.units.get(i + 1).is_some_and(Unit::is_date_marker)
            })
            .collect();
        let before = self.units.len();
        let mut flags = stale.into_iter();
        self.units.retain(|_| !flags.next().unwrap_or(false));
        before - self.units.len()
    }
}
