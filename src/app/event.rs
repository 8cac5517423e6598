use crate::app::message::{FeedEvent, MessageId};
use crate::app::state::FeedStatus;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Event decoded from the relay feed
    Feed(FeedEvent),

    /// Feed line that could not be decoded; the id is kept when readable
    FeedMalformed {
        message_id: Option<MessageId>,
        error: String,
    },

    /// Feed connection state changed
    FeedStatus(FeedStatus),

    /// Tick for UI refresh and idle processing
    Tick,
}
