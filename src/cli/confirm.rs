//! Interactive near-quota confirmation

use std::io::{self, IsTerminal};

use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::ProgressBar;
use tracing::warn;

use crate::application::ports::UploadConfirmer;
use crate::domain::subscription::QuotaWarning;

/// Asks on the terminal; declines when stdin is not interactive
#[derive(Clone, Default)]
pub struct PromptConfirmer {
    /// Spinner hidden while the prompt is shown
    spinner: Option<ProgressBar>,
}

impl PromptConfirmer {
    pub fn new(spinner: Option<ProgressBar>) -> Self {
        Self { spinner }
    }
}

fn ask(prompt: String) -> dialoguer::Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
}

#[async_trait]
impl UploadConfirmer for PromptConfirmer {
    async fn confirm_near_quota(&self, warning: &QuotaWarning) -> bool {
        if !io::stdin().is_terminal() {
            warn!("Near quota and no terminal to confirm; pass --yes to upload anyway");
            return false;
        }

        let prompt = format!("{warning} Voulez-vous continuer ?");
        let spinner = self.spinner.clone();
        let answer = tokio::task::spawn_blocking(move || match spinner {
            Some(spinner) => spinner.suspend(|| ask(prompt)),
            None => ask(prompt),
        })
        .await;

        match answer {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                warn!(error = %e, "Confirmation prompt failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Confirmation prompt task failed");
                false
            }
        }
    }
}
