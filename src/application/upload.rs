//! Upload use case
//!
//! Gates an upload against the user's subscription, then drives the
//! pipeline: task → provisional meeting → transcription → summary →
//! finalized meeting → completed task. Stages run strictly in order and
//! nothing is rolled back on failure.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::domain::audio::{AudioAsset, DurationEstimate};
use crate::domain::error::InvalidFileTypeError;
use crate::domain::meeting::{
    final_title, provisional_title, MeetingId, MeetingUpdate, NewMeeting, NewTask, TaskId,
    TaskUpdate,
};
use crate::domain::subscription::{check_quota, QuotaCheck, QuotaError, SubscriptionSnapshot};
use crate::domain::transcription::{SystemPrompt, Transcript};

use super::ports::{
    MeetingStore, StoreError, SummarizationError, Summarizer, TaskStore, Transcriber,
    TranscriptionError, TranscriptionProgress, UploadConfirmer,
};

pub const MSG_STARTING: &str = "Démarrage du traitement...";
pub const MSG_PREPARING: &str = "Préparation de la transcription...";
pub const MSG_SENDING: &str = "Envoi au serveur de transcription...";
pub const MSG_SUMMARIZING: &str = "Génération du résumé IA...";
pub const MSG_COMPLETED: &str = "Transcription terminée";

pub const PERCENT_PREPARING: u8 = 10;
pub const PERCENT_SENDING: u8 = 20;
pub const PERCENT_TRANSCRIBING: u8 = 60;
pub const PERCENT_SUMMARIZING: u8 = 80;
pub const PERCENT_COMPLETED: u8 = 100;

/// Pause between finalizing the meeting and completing the task, so
/// listeners keyed on completion read a consistent record
pub const COMPLETION_DELAY: Duration = Duration::from_millis(100);

/// Errors from the upload use case
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    InvalidFileType(#[from] InvalidFileTypeError),

    #[error(transparent)]
    Quota(#[from] QuotaError),

    #[error("Erreur lors de la création de la tâche : {0}")]
    TaskCreationFailed(StoreError),

    #[error("Erreur lors de la création de la réunion : {0}")]
    RecordCreationFailed(StoreError),

    #[error("Erreur de transcription : {0}")]
    TranscriptionFailed(TranscriptionError),

    #[error("Erreur lors de la génération du résumé : {0}")]
    SummarizationFailed(SummarizationError),

    #[error("Erreur lors de la mise à jour de la réunion : {0}")]
    PersistenceUpdateFailed(StoreError),
}

impl UploadError {
    /// Refusals raised before anything was created
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidFileType(_) | Self::Quota(_))
    }
}

/// User-supplied fields for the meeting
#[derive(Debug, Clone, Default)]
pub struct UploadFields {
    pub user_id: String,
    /// Title typed by the user; wins over the AI suggestion
    pub title: Option<String>,
    pub notes: Option<String>,
}

impl UploadFields {
    fn user_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Coarse progress reported to the caller after each stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    pub percent: u8,
    pub message: String,
    pub meeting_id: Option<MeetingId>,
}

/// Caller-supplied progress sink
pub type ProgressCallback = Arc<dyn Fn(&UploadProgress) + Send + Sync>;

/// Result of an upload attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Pipeline ran to completion
    Completed {
        task_id: TaskId,
        meeting_id: MeetingId,
        title: String,
        duration_secs: i64,
    },
    /// The user declined the near-quota confirmation
    Declined,
}

/// Upload orchestration use case
pub struct UploadOrchestrator<T, S, M, K, C>
where
    T: Transcriber,
    S: Summarizer,
    M: MeetingStore,
    K: TaskStore,
    C: UploadConfirmer,
{
    transcriber: T,
    summarizer: S,
    meetings: M,
    tasks: K,
    confirmer: C,
    completion_delay: Duration,
}

impl<T, S, M, K, C> UploadOrchestrator<T, S, M, K, C>
where
    T: Transcriber,
    S: Summarizer,
    M: MeetingStore,
    K: TaskStore,
    C: UploadConfirmer,
{
    /// Create a new use case instance
    pub fn new(transcriber: T, summarizer: S, meetings: M, tasks: K, confirmer: C) -> Self {
        Self {
            transcriber,
            summarizer,
            meetings,
            tasks,
            confirmer,
            completion_delay: COMPLETION_DELAY,
        }
    }

    /// Override the pause before the task is marked completed
    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
        self
    }

    /// Check the quota and, if allowed, run the whole pipeline.
    ///
    /// `subscription` is `None` when the user has no subscription row, in
    /// which case nothing is gated.
    pub async fn execute(
        &self,
        asset: &AudioAsset,
        duration: DurationEstimate,
        subscription: Option<&SubscriptionSnapshot>,
        fields: &UploadFields,
        on_progress: Option<ProgressCallback>,
    ) -> Result<UploadOutcome, UploadError> {
        if let Some(subscription) = subscription {
            match check_quota(subscription, duration)? {
                QuotaCheck::NearLimit(warning) => {
                    if !self.confirmer.confirm_near_quota(&warning).await {
                        info!(
                            minutes = warning.minutes,
                            remaining_after = warning.remaining_after,
                            "Upload declined near quota"
                        );
                        return Ok(UploadOutcome::Declined);
                    }
                }
                QuotaCheck::WithinQuota | QuotaCheck::Unmetered => {}
            }
        }

        let task_id = self
            .tasks
            .create_task(&NewTask::upload(&fields.user_id, MSG_STARTING))
            .await
            .map_err(UploadError::TaskCreationFailed)?;

        info!(task = %task_id, file = asset.name(), duration = %duration, "Upload started");

        match self
            .run_pipeline(&task_id, asset, duration, fields, on_progress.as_ref())
            .await
        {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(task = %task_id, error = %e, "Upload failed");
                if let Err(store_err) = self
                    .tasks
                    .update_task(&task_id, &TaskUpdate::failed(e.to_string()))
                    .await
                {
                    warn!(task = %task_id, error = %store_err, "Failed to mark task as errored");
                }
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        task_id: &TaskId,
        asset: &AudioAsset,
        duration: DurationEstimate,
        fields: &UploadFields,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<UploadOutcome, UploadError> {
        self.report(
            task_id,
            TaskUpdate::progress(MSG_PREPARING, PERCENT_PREPARING),
            on_progress,
        )
        .await;

        let provisional = fields
            .user_title()
            .map(str::to_string)
            .unwrap_or_else(|| provisional_title(Local::now().date_naive()));

        let meeting = self
            .meetings
            .create_meeting(&NewMeeting::provisional(
                &fields.user_id,
                &provisional,
                duration.as_secs() as i64,
                fields.notes.clone(),
            ))
            .await
            .map_err(UploadError::RecordCreationFailed)?;

        info!(task = %task_id, meeting = %meeting.id, "Provisional meeting created");

        self.report(
            task_id,
            TaskUpdate::progress(MSG_SENDING, PERCENT_SENDING).with_meeting(&meeting.id),
            on_progress,
        )
        .await;

        let prompt = SystemPrompt::with_context(fields.user_title().unwrap_or_default());
        let transcript = self
            .transcribe_with_relay(task_id, asset, &prompt, on_progress)
            .await
            .map_err(UploadError::TranscriptionFailed)?;

        let actual_duration = transcript.resolved_duration(duration.as_secs());

        // Keep the transcript even if summarization fails afterwards
        self.meetings
            .update_meeting(
                &meeting.id,
                &MeetingUpdate {
                    transcript: Some(transcript.text.clone()),
                    duration: Some(actual_duration),
                    ..Default::default()
                },
            )
            .await
            .map_err(UploadError::PersistenceUpdateFailed)?;

        self.report(
            task_id,
            TaskUpdate::progress(MSG_SUMMARIZING, PERCENT_SUMMARIZING),
            on_progress,
        )
        .await;

        let summary = self
            .summarizer
            .summarize(&transcript.text)
            .await
            .map_err(UploadError::SummarizationFailed)?;

        let title = final_title(fields.user_title(), &summary.title, &provisional);

        self.meetings
            .update_meeting(
                &meeting.id,
                &MeetingUpdate {
                    title: Some(title.clone()),
                    transcript: Some(transcript.text),
                    summary: Some(summary.summary),
                    duration: Some(actual_duration),
                },
            )
            .await
            .map_err(UploadError::PersistenceUpdateFailed)?;

        info!(task = %task_id, meeting = %meeting.id, title = %title, "Meeting finalized");

        tokio::time::sleep(self.completion_delay).await;

        // Only a completed task exposes the meeting; a failed write fails the upload
        let completed = TaskUpdate::completed(MSG_COMPLETED, &meeting.id);
        self.tasks
            .update_task(task_id, &completed)
            .await
            .map_err(UploadError::PersistenceUpdateFailed)?;
        notify_progress(&completed, on_progress);

        Ok(UploadOutcome::Completed {
            task_id: task_id.clone(),
            meeting_id: meeting.id,
            title,
            duration_secs: actual_duration,
        })
    }

    /// Run the transcriber while relaying its progress messages into the task.
    async fn transcribe_with_relay(
        &self,
        task_id: &TaskId,
        asset: &AudioAsset,
        prompt: &SystemPrompt,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<Transcript, TranscriptionError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let relay: TranscriptionProgress = Arc::new(move |message: &str| {
            let _ = tx.send(message.to_string());
        });

        let transcription = self.transcriber.transcribe(asset, prompt, relay);
        tokio::pin!(transcription);

        let result = loop {
            tokio::select! {
                biased;
                Some(message) = rx.recv() => {
                    self.report(
                        task_id,
                        TaskUpdate::progress(message, PERCENT_TRANSCRIBING),
                        on_progress,
                    )
                    .await;
                }
                result = &mut transcription => break result,
            }
        };

        while let Ok(message) = rx.try_recv() {
            self.report(
                task_id,
                TaskUpdate::progress(message, PERCENT_TRANSCRIBING),
                on_progress,
            )
            .await;
        }

        result
    }

    /// Forward an intermediate stage update to the caller and the task store.
    /// These task writes are best-effort.
    async fn report(
        &self,
        task_id: &TaskId,
        update: TaskUpdate,
        on_progress: Option<&ProgressCallback>,
    ) {
        notify_progress(&update, on_progress);

        if let Err(e) = self.tasks.update_task(task_id, &update).await {
            warn!(task = %task_id, error = %e, "Failed to update task progress");
        }
    }
}

fn notify_progress(update: &TaskUpdate, on_progress: Option<&ProgressCallback>) {
    if let Some(cb) = on_progress {
        cb(&UploadProgress {
            percent: update.progress_percent.unwrap_or_default(),
            message: update.progress.clone().unwrap_or_default(),
            meeting_id: update.meeting_id.clone(),
        });
    }
}
