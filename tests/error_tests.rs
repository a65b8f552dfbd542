//! Error path integration tests

use std::path::Path;
use std::process::{Command, Output};

const REMOTE_ENV: &[&str] = &[
    "SUPABASE_URL",
    "SUPABASE_KEY",
    "GEMINI_API_KEY",
    "OPENAI_API_KEY",
    "MEETING_SCRIBE_USER_ID",
];

fn run(config_home: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_meeting-scribe"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG");
    for var in REMOTE_ENV {
        cmd.env_remove(var);
    }
    cmd.args(args).output().expect("Failed to execute command")
}

#[test]
fn config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["config", "get", "api_key"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown key"), "got: {stderr}");
    assert!(stderr.contains("supabase_url"), "got: {stderr}");
}

#[test]
fn config_set_invalid_bool() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["config", "set", "notify", "sometimes"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'true' or 'false'"), "got: {stderr}");
}

#[test]
fn config_set_invalid_url() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["config", "set", "supabase_url", "notaurl"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("http(s) URL"), "got: {stderr}");
    assert!(!home.path().join("meeting-scribe").join("config.toml").exists());
}

#[test]
fn upload_rejects_non_audio_file() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("notes.txt");
    std::fs::write(&file, b"ordre du jour").unwrap();

    let output = run(home.path(), &["upload", file.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fichier audio valide"), "got: {stderr}");
    assert!(stderr.contains("notes.txt"), "got: {stderr}");
}

#[test]
fn upload_missing_file() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("absent.mp3");

    let output = run(home.path(), &["upload", file.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absent.mp3"), "got: {stderr}");
}

#[test]
fn upload_without_settings_names_missing_key() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("call.mp3");
    std::fs::write(&file, vec![0u8; 256]).unwrap();

    let output = run(home.path(), &["upload", file.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("supabase_url"), "got: {stderr}");
    assert!(stderr.contains("SUPABASE_URL"), "got: {stderr}");
}

#[test]
fn setup_without_user_fails() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_meeting-scribe"));
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env("SUPABASE_URL", "http://127.0.0.1:9")
        .env("SUPABASE_KEY", "anon")
        .env_remove("MEETING_SCRIBE_USER_ID")
        .env_remove("RUST_LOG");

    let output = cmd.arg("setup").output().expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MEETING_SCRIBE_USER_ID"), "got: {stderr}");
}

#[test]
fn probe_missing_file() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["probe", "/nonexistent/meeting.wav"]);

    assert_eq!(output.status.code(), Some(1));
}
