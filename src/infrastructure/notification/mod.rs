//! Notification infrastructure module
//!
//! Desktop notifications through the freedesktop `notify-send` tool.

mod notify_send;

pub use notify_send::{NotifySendNotifier, APP_NAME};

use crate::application::ports::Notifier;

/// Create the default notifier for the current platform
pub fn create_notifier() -> Box<dyn Notifier> {
    Box::new(NotifySendNotifier::new())
}
