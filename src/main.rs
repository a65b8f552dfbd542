//! MeetingScribe CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meeting_scribe::cli::{
    app::{load_merged_config, run_probe, run_setup, run_upload, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    UploadOptions,
};
use meeting_scribe::domain::config::AppConfig;
use meeting_scribe::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("meeting_scribe={log_level},warn")))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Config { action } => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Probe { file } => run_probe(&file).await,
        Commands::Setup { user, dismiss } => {
            let config = load_merged_config(AppConfig {
                user_id: user,
                ..Default::default()
            })
            .await;
            run_setup(dismiss, &config).await
        }
        Commands::Upload(args) => {
            let config = load_merged_config(AppConfig {
                user_id: args.user,
                notify: args.notify.then_some(true),
                ..Default::default()
            })
            .await;

            let options = UploadOptions {
                file: args.file,
                media_type: args.media_type,
                title: args.title,
                notes: args.notes,
                assume_yes: args.yes,
                notify: args.notify,
            };

            run_upload(options, &config).await
        }
    }
}
