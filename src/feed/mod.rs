//! Relay event feed: newline-delimited JSON over TCP.
//!
//! The feed task connects, forwards each decoded line to the main loop and
//! reconnects after a fixed delay whenever the connection drops. It stops
//! once the main loop's receiver is gone.

use crate::app::event::AppEvent;
use crate::app::message::{FeedEvent, MessageId};
use crate::app::state::FeedStatus;
use crate::config::model::FeedConfig;
use serde_json::Value;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("connect failed: {0}")]
    Connect(io::Error),

    #[error("read failed: {0}")]
    Read(io::Error),

    #[error("event receiver closed")]
    ReceiverClosed,
}

/// A feed line that did not decode. The message id is recovered from the
/// raw JSON when present so the high-water mark can still advance.
#[derive(Debug, Error, PartialEq)]
#[error("malformed feed event: {error}")]
pub struct Malformed {
    pub message_id: Option<MessageId>,
    pub error: String,
}

pub fn parse_line(line: &str) -> Result<FeedEvent, Malformed> {
    let value: Value = serde_json::from_str(line).map_err(|e| Malformed {
        message_id: None,
        error: e.to_string(),
    })?;
    let message_id = value.pointer("/data/msg/id").and_then(Value::as_i64);
    serde_json::from_value(value).map_err(|e| Malformed {
        message_id,
        error: e.to_string(),
    })
}

pub fn spawn_feed(config: FeedConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(run_feed(config, event_tx))
}

async fn run_feed(config: FeedConfig, event_tx: mpsc::UnboundedSender<AppEvent>) {
    let delay = Duration::from_millis(config.reconnect_delay_ms);
    let mut attempt: u32 = 0;
    let mut status = FeedStatus::Connecting;

    loop {
        if event_tx.send(AppEvent::FeedStatus(status)).is_err() {
            return;
        }

        let reason = match read_feed(&config.address, &event_tx).await {
            Ok(()) => {
                attempt = 0;
                "connection closed".to_string()
            }
            Err(FeedError::ReceiverClosed) => return,
            Err(e @ FeedError::Connect(_)) => e.to_string(),
            Err(e) => {
                attempt = 0;
                e.to_string()
            }
        };
        info!(address = %config.address, %reason, "feed disconnected");

        if event_tx
            .send(AppEvent::FeedStatus(FeedStatus::Disconnected(reason)))
            .is_err()
        {
            return;
        }

        tokio::time::sleep(delay).await;
        attempt = attempt.saturating_add(1);
        status = FeedStatus::Reconnecting { attempt };
    }
}

// Ok means the relay closed a connection that had been established.
async fn read_feed(
    address: &str,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) -> Result<(), FeedError> {
    let stream = TcpStream::connect(address)
        .await
        .map_err(FeedError::Connect)?;
    info!(address, "feed connected");
    forward(event_tx, AppEvent::FeedStatus(FeedStatus::Connected))?;

    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await.map_err(FeedError::Read)? {
        if line.trim().is_empty() {
            continue;
        }
        let event = match parse_line(&line) {
            Ok(event) => AppEvent::Feed(event),
            Err(Malformed { message_id, error }) => {
                warn!(?message_id, %error, "malformed feed event");
                AppEvent::FeedMalformed { message_id, error }
            }
        };
        forward(event_tx, event)?;
    }
    Ok(())
}

fn forward(event_tx: &mpsc::UnboundedSender<AppEvent>, event: AppEvent) -> Result<(), FeedError> {
    event_tx.send(event).map_err(|_| FeedError::ReceiverClosed)
}
