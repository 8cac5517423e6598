//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Extra words that highlight a message, matched case-insensitively.
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the relay event feed lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            reconnect_delay_ms: default_reconnect_delay(),
        }
    }
}

/// How join/part/mode style events are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMessages {
    Shown,
    #[default]
    Condensed,
    Hidden,
}

/// UI appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default)]
    pub status_messages: StatusMessages,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            status_messages: StatusMessages::default(),
        }
    }
}

/// Alerting: bell, desktop notifications, which messages alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default)]
    pub desktop: bool,
    #[serde(default)]
    pub notify_all_messages: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            sound: true,
            desktop: false,
            notify_all_messages: false,
        }
    }
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

/// Client-side persisted UI state (collapsed networks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_address() -> String {
    "127.0.0.1:9000".to_string()
}
fn default_reconnect_delay() -> u64 {
    2000
}
fn default_timestamp_format() -> String {
    "%H:%M".to_string()
}
fn default_log_file() -> String {
    "~/.local/share/crablounge/crablounge.log".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_storage_path() -> String {
    "~/.local/share/crablounge/storage.json".to_string()
}
