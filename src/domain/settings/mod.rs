//! User e-mail settings and setup completeness

use serde::{Deserialize, Serialize};

/// How meeting summaries are e-mailed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailMethod {
    Gmail,
    Smtp,
    #[serde(untagged)]
    Other(String),
}

/// The subset of `user_settings` that decides whether setup is finished
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSettings {
    pub email_method: Option<EmailMethod>,
    pub gmail_connected: Option<bool>,
    pub smtp_host: Option<String>,
    pub smtp_user: Option<String>,
    pub signature_text: Option<String>,
}

impl UserSettings {
    /// Whether the chosen e-mail method is fully configured and a signature exists
    pub fn is_complete(&self) -> bool {
        let method_ready = match self.email_method {
            Some(EmailMethod::Gmail) => self.gmail_connected.unwrap_or(false),
            Some(EmailMethod::Smtp) => is_set(&self.smtp_host) && is_set(&self.smtp_user),
            _ => true,
        };
        method_ready && is_set(&self.signature_text)
    }
}

/// Setup is incomplete when there is no settings row at all
pub fn is_setup_incomplete(settings: Option<&UserSettings>) -> bool {
    settings.map(|s| !s.is_complete()).unwrap_or(true)
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.is_empty()).unwrap_or(false)
}
