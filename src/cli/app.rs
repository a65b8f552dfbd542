//! Command runners

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::{
    AlwaysConfirm, ConfigStore, NotificationIcon, Notifier, SubscriptionStore, UploadConfirmer,
};
use crate::application::upload::MSG_STARTING;
use crate::application::{
    DurationProbe, ProgressCallback, SetupReminder, UploadError, UploadFields,
    UploadOrchestrator, UploadOutcome, UploadProgress,
};
use crate::domain::audio::AudioAsset;
use crate::domain::config::AppConfig;
use crate::domain::error::{ConfigError, InvalidFileTypeError};
use crate::infrastructure::{
    create_notifier, GeminiTranscriber, OpenAiSummarizer, SupabaseClient, SymphoniaDecoder,
    SymphoniaMetadataReader, TomlFlagStore, XdgConfigStore,
};

use super::args::UploadOptions;
use super::confirm::PromptConfirmer;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variables read into the config
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_KEY";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_USER_ID: &str = "MEETING_SCRIBE_USER_ID";

/// Print the detected duration of a file
pub async fn run_probe(file: &Path) -> ExitCode {
    let presenter = Presenter::new();

    let asset = match read_asset(file, None).await {
        Ok(asset) => asset,
        Err(failure) => return failure.report(&presenter),
    };

    let estimate = probe_duration(&asset).await;
    if estimate.is_unknown() {
        presenter.warn("Durée inconnue");
    }
    presenter.output(&format!(
        "{} ({} s, {})",
        estimate,
        estimate.as_secs(),
        estimate.source().as_str()
    ));

    ExitCode::from(EXIT_SUCCESS)
}

/// Upload a recording and run the transcription pipeline
pub async fn run_upload(options: UploadOptions, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let asset = match read_asset(&options.file, options.media_type.as_deref()).await {
        Ok(asset) => asset,
        Err(failure) => return failure.report(&presenter),
    };

    let remote = match RemoteSettings::from_config(config) {
        Ok(remote) => remote,
        Err(e) => return config_failure(&presenter, e),
    };
    let (gemini_key, openai_key) = match (
        require(&config.gemini_api_key, "gemini_api_key", ENV_GEMINI_API_KEY),
        require(&config.openai_api_key, "openai_api_key", ENV_OPENAI_API_KEY),
    ) {
        (Ok(gemini), Ok(openai)) => (gemini, openai),
        (Err(e), _) | (_, Err(e)) => return config_failure(&presenter, e),
    };

    presenter.start_spinner("Analyse de la durée...");
    let duration = probe_duration(&asset).await;
    presenter.stop_spinner();
    presenter.info(&format!(
        "{} · durée {} ({})",
        asset,
        duration,
        duration.source().as_str()
    ));

    let client = SupabaseClient::new(&remote.supabase_url, &remote.supabase_key);
    let subscription = match client.get_subscription(&remote.user_id).await {
        Ok(subscription) => subscription,
        Err(e) => {
            presenter.error(&format!("Impossible de lire l'abonnement : {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.start_spinner(MSG_STARTING);
    let spinner = presenter.spinner_handle();

    let confirmer: Box<dyn UploadConfirmer> = if options.assume_yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(PromptConfirmer::new(spinner.clone()))
    };

    let use_case = UploadOrchestrator::new(
        GeminiTranscriber::with_model(gemini_key, config.transcription_model_or_default()),
        OpenAiSummarizer::with_model(openai_key, config.summary_model_or_default()),
        client.clone(),
        client,
        confirmer,
    );

    let on_progress: ProgressCallback = Arc::new(move |progress: &UploadProgress| {
        if let Some(ref spinner) = spinner {
            spinner.set_message(Presenter::format_progress(progress));
        }
    });

    let fields = UploadFields {
        user_id: remote.user_id,
        title: options.title,
        notes: options.notes,
    };

    let notifier = (options.notify || config.notify_or_default()).then(create_notifier);

    match use_case
        .execute(&asset, duration, subscription.as_ref(), &fields, Some(on_progress))
        .await
    {
        Ok(UploadOutcome::Completed {
            meeting_id, title, ..
        }) => {
            presenter.spinner_success("Transcription terminée");
            presenter.output(&format!("{}\t{}", meeting_id, title));
            notify(notifier.as_ref(), "Transcription terminée", &title, NotificationIcon::Success).await;
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(UploadOutcome::Declined) => {
            presenter.stop_spinner();
            presenter.warn("Upload annulé");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            if e.is_rejection() {
                presenter.stop_spinner();
            } else {
                presenter.spinner_fail("Échec du traitement");
            }
            presenter.error(&e.to_string());
            notify(notifier.as_ref(), "Échec de l'upload", &e.to_string(), NotificationIcon::Error).await;
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Show, or dismiss, the e-mail setup reminder
pub async fn run_setup(dismiss: bool, config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let remote = match RemoteSettings::from_config(config) {
        Ok(remote) => remote,
        Err(e) => return config_failure(&presenter, e),
    };

    let flags = TomlFlagStore::in_dir(XdgConfigStore::new().dir());
    let reminder = SetupReminder::new(
        SupabaseClient::new(&remote.supabase_url, &remote.supabase_key),
        flags,
    );

    if dismiss {
        return match reminder.dismiss(&remote.user_id).await {
            Ok(()) => {
                presenter.success("Rappel de configuration masqué");
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    if reminder.should_show(&remote.user_id).await {
        presenter.warn(
            "Configuration incomplète : connectez votre messagerie (Gmail ou SMTP) et ajoutez une signature pour envoyer vos comptes rendus.",
        );
        presenter.output("incomplete");
    } else {
        presenter.output("ok");
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "Ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.is_empty());
    AppConfig {
        supabase_url: var(ENV_SUPABASE_URL),
        supabase_key: var(ENV_SUPABASE_KEY),
        gemini_api_key: var(ENV_GEMINI_API_KEY),
        openai_api_key: var(ENV_OPENAI_API_KEY),
        user_id: var(ENV_USER_ID),
        ..Default::default()
    }
}

/// Connection settings shared by the remote-backed commands
struct RemoteSettings {
    supabase_url: String,
    supabase_key: String,
    user_id: String,
}

impl RemoteSettings {
    fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            supabase_url: require(&config.supabase_url, "supabase_url", ENV_SUPABASE_URL)?,
            supabase_key: require(&config.supabase_key, "supabase_key", ENV_SUPABASE_KEY)?,
            user_id: require(&config.user_id, "user_id", ENV_USER_ID)?,
        })
    }
}

fn require(
    value: &Option<String>,
    key: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    value
        .clone()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing { key, env })
}

fn config_failure(presenter: &Presenter, err: ConfigError) -> ExitCode {
    presenter.error(&err.to_string());
    ExitCode::from(EXIT_ERROR)
}

/// Why a file could not be turned into an asset
enum AssetFailure {
    Unreadable(String),
    Rejected(InvalidFileTypeError),
}

impl AssetFailure {
    fn report(self, presenter: &Presenter) -> ExitCode {
        match self {
            Self::Unreadable(message) => {
                presenter.error(&message);
                ExitCode::from(EXIT_ERROR)
            }
            Self::Rejected(e) => {
                presenter.error(&UploadError::from(e).to_string());
                ExitCode::from(EXIT_USAGE_ERROR)
            }
        }
    }
}

async fn read_asset(path: &Path, media_type: Option<&str>) -> Result<AudioAsset, AssetFailure> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| AssetFailure::Unreadable(format!("Impossible de lire {} : {}", path.display(), e)))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let asset = match media_type {
        Some(media_type) => AudioAsset::new(name, media_type, data),
        None => AudioAsset::from_named_bytes(name, data),
    }
    .map_err(AssetFailure::Rejected)?;

    if asset.is_empty() {
        warn!(file = asset.name(), "Audio file is empty");
    }
    info!(file = asset.name(), media_type = asset.media_type(), size = %asset.human_readable_size(), "Loaded audio file");
    Ok(asset)
}

async fn probe_duration(asset: &AudioAsset) -> crate::domain::audio::DurationEstimate {
    DurationProbe::new(SymphoniaMetadataReader, SymphoniaDecoder)
        .probe(asset)
        .await
}

async fn notify<N: Notifier>(notifier: Option<&N>, title: &str, message: &str, icon: NotificationIcon) {
    if let Some(notifier) = notifier {
        if let Err(e) = notifier.notify(title, message, icon).await {
            warn!(error = %e, "Desktop notification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank() {
        let err = require(&Some("  ".to_string()), "user_id", ENV_USER_ID).unwrap_err();
        assert!(err.to_string().contains("MEETING_SCRIBE_USER_ID"));
        assert!(require(&None, "user_id", ENV_USER_ID).is_err());
        assert_eq!(
            require(&Some("u-1".to_string()), "user_id", ENV_USER_ID).unwrap(),
            "u-1"
        );
    }

    #[test]
    fn remote_settings_need_all_three() {
        let config = AppConfig {
            supabase_url: Some("https://x.supabase.co".to_string()),
            supabase_key: Some("anon".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            RemoteSettings::from_config(&config),
            Err(ConfigError::Missing { key: "user_id", .. })
        ));
    }

    #[tokio::test]
    async fn read_asset_rejects_non_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        assert!(matches!(
            read_asset(&path, None).await,
            Err(AssetFailure::Rejected(_))
        ));
        assert!(read_asset(&path, Some("audio/mpeg")).await.is_ok());
    }

    #[tokio::test]
    async fn read_asset_missing_file() {
        assert!(matches!(
            read_asset(Path::new("/nonexistent/a.mp3"), None).await,
            Err(AssetFailure::Unreadable(_))
        ));
    }
}
