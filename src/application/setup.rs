//! Setup reminder use case
//!
//! Decides whether the user should be nudged to finish configuring their
//! e-mail settings.

use tracing::{debug, warn};

use crate::domain::error::ConfigError;
use crate::domain::settings::is_setup_incomplete;

use super::ports::{DismissStore, SettingsStore};

const DISMISS_KEY_PREFIX: &str = "setup_reminder_dismissed_";

/// Flag key remembering that `user_id` dismissed the reminder
pub fn dismiss_key(user_id: &str) -> String {
    format!("{DISMISS_KEY_PREFIX}{user_id}")
}

/// Setup reminder use case
pub struct SetupReminder<S, D>
where
    S: SettingsStore,
    D: DismissStore,
{
    settings: S,
    dismissals: D,
}

impl<S, D> SetupReminder<S, D>
where
    S: SettingsStore,
    D: DismissStore,
{
    pub fn new(settings: S, dismissals: D) -> Self {
        Self {
            settings,
            dismissals,
        }
    }

    /// Whether the reminder should be displayed for `user_id`.
    /// A settings read failure hides it.
    pub async fn should_show(&self, user_id: &str) -> bool {
        if self.dismissals.is_dismissed(&dismiss_key(user_id)).await {
            debug!(user = user_id, "Setup reminder dismissed");
            return false;
        }

        match self.settings.get_settings(user_id).await {
            Ok(settings) => is_setup_incomplete(settings.as_ref()),
            Err(e) => {
                warn!(user = user_id, error = %e, "Failed to read user settings");
                false
            }
        }
    }

    /// Remember that the user dismissed the reminder
    pub async fn dismiss(&self, user_id: &str) -> Result<(), ConfigError> {
        self.dismissals.dismiss(&dismiss_key(user_id)).await
    }
}
