//! CLI integration tests

use std::path::Path;
use std::process::Command;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;

fn meeting_scribe_bin(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_meeting-scribe"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG");
    cmd
}

/// Two seconds of 8 kHz mono silence
fn write_wav(path: &Path) {
    let frames: u32 = 16_000;
    let data_len = frames * 2;
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&8000u32.to_le_bytes());
    out.extend_from_slice(&16000u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + data_len as usize, 0);
    std::fs::write(path, out).unwrap();
}

#[test]
fn help_output() {
    let home = tempfile::tempdir().unwrap();
    let output = meeting_scribe_bin(home.path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("upload"));
    assert!(stdout.contains("probe"));
    assert!(stdout.contains("setup"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("--verbose"));
}

#[test]
fn upload_help_lists_options() {
    let home = tempfile::tempdir().unwrap();
    let output = meeting_scribe_bin(home.path())
        .args(["upload", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--title", "--notes", "--type", "--user", "--yes", "--notify"] {
        assert!(stdout.contains(flag), "missing {flag} in: {stdout}");
    }
}

#[test]
fn version_output() {
    let home = tempfile::tempdir().unwrap();
    let output = meeting_scribe_bin(home.path())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("meeting-scribe"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = meeting_scribe_bin(home.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn config_path_command() {
    let home = tempfile::tempdir().unwrap();
    let output = meeting_scribe_bin(home.path())
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("meeting-scribe"));
    assert!(stdout.trim_end().ends_with("config.toml"));
}

#[test]
fn config_set_then_get_masks_secrets() {
    let home = tempfile::tempdir().unwrap();

    let set = meeting_scribe_bin(home.path())
        .args(["config", "set", "openai_api_key", "sk-test-1234567890"])
        .output()
        .expect("Failed to execute command");
    assert!(set.status.success(), "{}", String::from_utf8_lossy(&set.stderr));

    let get = meeting_scribe_bin(home.path())
        .args(["config", "get", "openai_api_key"])
        .output()
        .expect("Failed to execute command");
    assert!(get.status.success());
    assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "sk-t...7890");

    let list = meeting_scribe_bin(home.path())
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(stdout.contains("supabase_url"));
    assert!(stdout.contains("(not set)"));
    assert!(!stdout.contains("sk-test-1234567890"));
}

#[test]
fn config_init_twice_fails() {
    let home = tempfile::tempdir().unwrap();

    let first = meeting_scribe_bin(home.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());
    assert!(home.path().join("meeting-scribe").join("config.toml").exists());

    let second = meeting_scribe_bin(home.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(second.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));
}

#[test]
fn probe_reads_wav_duration() {
    let home = tempfile::tempdir().unwrap();
    let wav = home.path().join("silence.wav");
    write_wav(&wav);

    let output = meeting_scribe_bin(home.path())
        .args(["probe"])
        .arg(&wav)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0:02"), "got: {stdout}");
    assert!(stdout.contains("measured-metadata"), "got: {stdout}");
}

#[test]
fn probe_falls_back_to_size_estimate() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("broken.mp3");
    std::fs::write(&file, vec![0x42u8; 1024]).unwrap();

    let output = meeting_scribe_bin(home.path())
        .args(["probe"])
        .arg(&file)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("60 s"), "got: {stdout}");
    assert!(stdout.contains("estimated-from-size"), "got: {stdout}");
}

#[test]
fn probe_warns_on_empty_file() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("vide.wav");
    std::fs::write(&file, b"").unwrap();

    let output = meeting_scribe_bin(home.path())
        .args(["probe"])
        .arg(&file)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("0:00 (0 s"), "got: {stdout}");
    assert!(stderr.contains("Audio file is empty"), "got: {stderr}");
}

#[test]
fn config_help_lists_actions() {
    AssertCommand::cargo_bin("meeting-scribe")
        .unwrap()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("set"))
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("list"))
                .and(predicate::str::contains("path")),
        );
}

#[test]
fn setup_help_mentions_dismiss() {
    AssertCommand::cargo_bin("meeting-scribe")
        .unwrap()
        .args(["setup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dismiss"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    AssertCommand::cargo_bin("meeting-scribe")
        .unwrap()
        .arg("record")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
