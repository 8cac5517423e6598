//! Desktop notification delivery.
//!
//! Delivery is best effort: [`Notifier::dispatch`] hands the notification to
//! a blocking worker and never observes the result beyond a debug log line.

use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification surface unavailable")]
    Unavailable,
    #[error("persistent delivery not supported")]
    Unsupported,
    #[error("failed to launch notifier: {0}")]
    Io(#[from] std::io::Error),
    #[error("notifier exited with {0}")]
    Failed(std::process::ExitStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopNotification {
    pub chan_id: i64,
    /// Message time in milliseconds since the epoch.
    pub timestamp: i64,
    pub title: String,
    pub body: String,
    /// Notifications with the same tag replace each other.
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Through a delivery surface that outlives the client.
    Persistent(DesktopNotification),
    /// Shown directly by the client.
    Direct(DesktopNotification),
}

pub trait DesktopSurface: Send + Sync {
    fn is_available(&self) -> bool;

    fn permission(&self) -> Permission;

    fn has_persistent(&self) -> bool {
        false
    }

    fn show(&self, notification: &DesktopNotification) -> Result<(), NotifyError>;

    fn post_persistent(&self, _notification: &DesktopNotification) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported)
    }
}

/// Shows notifications through the freedesktop `notify-send` tool.
pub struct NotifySendSurface {
    program: Option<PathBuf>,
}

impl NotifySendSurface {
    pub fn detect() -> Self {
        let program = which::which("notify-send").ok();
        if program.is_none() {
            debug!("notify-send not found, desktop notifications unavailable");
        }
        Self { program }
    }
}

impl DesktopSurface for NotifySendSurface {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    // Nothing to ask the user for: having the tool is the permission.
    fn permission(&self) -> Permission {
        if self.program.is_some() {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn show(&self, notification: &DesktopNotification) -> Result<(), NotifyError> {
        let program = self.program.as_ref().ok_or(NotifyError::Unavailable)?;
        let status = Command::new(program)
            .arg("--app-name=crablounge")
            .arg(format!("--hint=string:x-crablounge-tag:{}", notification.tag))
            .arg(&notification.title)
            .arg(&notification.body)
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(NotifyError::Failed(status))
        }
    }
}

/// Runs deliveries off the event loop.
pub struct Notifier {
    surface: Arc<dyn DesktopSurface>,
}

impl Notifier {
    pub fn new(surface: Arc<dyn DesktopSurface>) -> Self {
        Self { surface }
    }

    /// Fire and forget; must be called inside the tokio runtime.
    pub fn dispatch(&self, delivery: Delivery) {
        let surface = Arc::clone(&self.surface);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = deliver(surface.as_ref(), &delivery) {
                debug!(error = %e, "desktop notification dropped");
            }
        });
    }
}

pub fn deliver(surface: &dyn DesktopSurface, delivery: &Delivery) -> Result<(), NotifyError> {
    match delivery {
        Delivery::Persistent(n) => surface.post_persistent(n),
        Delivery::Direct(n) => surface.show(n),
    }
}
