//! Deferral of inbound feed events to idle points.
//!
//! Feed events wait until the terminal is quiet, but never longer than
//! [`IDLE_DEADLINE`]. Items come out in the order they went in.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const IDLE_DEADLINE: Duration = Duration::from_millis(2000);

pub struct IdleQueue<T> {
    deadline: Duration,
    items: VecDeque<(Instant, T)>,
}

impl<T> Default for IdleQueue<T> {
    fn default() -> Self {
        Self::new(IDLE_DEADLINE)
    }
}

impl<T> IdleQueue<T> {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            items: VecDeque::new(),
        }
    }

    pub fn push(&mut self, item: T, received_at: Instant) {
        self.items.push_back((received_at, item));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Everything when `idle`, otherwise only the items past the deadline.
    pub fn take_ready(&mut self, now: Instant, idle: bool) -> Vec<T> {
        let count = if idle {
            self.items.len()
        } else {
            self.items
                .iter()
                .take_while(|(at, _)| now.duration_since(*at) >= self.deadline)
                .count()
        };
        self.items.drain(..count).map(|(_, item)| item).collect()
    }
}
