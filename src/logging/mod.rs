//! Diagnostic logging to a file.
//!
//! The terminal belongs to the UI, so `tracing` output goes to the file
//! named in `[logging]`. The `CRABLOUNGE_LOG` environment variable takes
//! precedence over the configured level and accepts full filter directives
//! (`crablounge::sync=debug,info`).

use crate::config::expand_home;
use crate::config::model::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CRABLOUNGE_LOG";

/// Install the global subscriber. No-op when logging is disabled or a
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let path = expand_home(&config.file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(&config.level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
