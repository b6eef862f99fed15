//! Offline tests for the dbx binary
//!
//! Every case here fails or succeeds before any request reaches Dropbox, so
//! no account or network access is needed. Each test runs with its own
//! config directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_dbx(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dbx"))
        .args(args)
        .env("DBX_CONFIG_DIR", config_dir)
        .env("RUST_LOG", "off")
        .env_remove("DBX_ACCESS_TOKEN")
        .env_remove("DBX_PROFILE")
        .output()
        .expect("Failed to execute dbx command")
}

fn stderr_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stderr).unwrap_or_else(|e| {
        panic!(
            "stderr is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

#[test]
fn test_missing_arguments_exit_usage() {
    let config_dir = TempDir::new().unwrap();

    let output = run_dbx(&["upload", "only-one.txt"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));

    let output = run_dbx(&["retrieve-file"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_command_exit_usage() {
    let config_dir = TempDir::new().unwrap();
    let output = run_dbx(&["frobnicate"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_remote_path_exit_usage() {
    let config_dir = TempDir::new().unwrap();
    let output = run_dbx(
        &["list-files", "/a//b", "--token", "dummy"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_no_credential_exit_auth() {
    let config_dir = TempDir::new().unwrap();
    let output = run_dbx(&["list-main-dirs"], config_dir.path());
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("access token"));
}

#[test]
fn test_upload_missing_local_file_is_local_fault() {
    let config_dir = TempDir::new().unwrap();
    let missing = config_dir.path().join("does-not-exist.txt");
    let missing = missing.to_str().unwrap();

    let output = run_dbx(
        &["upload", missing, "/dst.txt", "--token", "dummy", "--json"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(5));
    assert!(output.stdout.is_empty());
    let fault = stderr_json(&output);
    assert_eq!(fault["category"], "local_not_found");
    assert_eq!(fault["path"], missing);
    assert!(
        fault["error"]
            .as_str()
            .unwrap()
            .starts_with("Upload failed for ")
    );
}

#[test]
fn test_push_missing_local_file_with_underscore_alias() {
    let config_dir = TempDir::new().unwrap();
    let missing = config_dir.path().join("nope.bin");

    let output = run_dbx(
        &[
            "push_file",
            missing.to_str().unwrap(),
            "/folder",
            "--token",
            "dummy",
        ],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Upload failed for"));
}

#[test]
fn test_retrieve_into_missing_directory_is_local_fault() {
    let config_dir = TempDir::new().unwrap();
    let missing_dir = config_dir.path().join("no-such-dir");

    let output = run_dbx(
        &[
            "retrieve-file",
            "/remote/file.txt",
            missing_dir.to_str().unwrap(),
            "--token",
            "dummy",
            "--json",
        ],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(5));
    let fault = stderr_json(&output);
    assert_eq!(fault["category"], "local_not_found");
    assert_eq!(fault["path"], "/remote/file.txt");
}

#[test]
fn test_create_root_rejected() {
    let config_dir = TempDir::new().unwrap();
    let output = run_dbx(&["create-subdir", "/", "--token", "dummy"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_profile_lifecycle() {
    let config_dir = TempDir::new().unwrap();

    let output = run_dbx(&["profile", "set", "work", "sl.secret"], config_dir.path());
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config_dir.path().join("config.toml").exists());

    let output = run_dbx(&["profile", "list", "--json"], config_dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("sl.secret"));
    let listed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(listed["profiles"][0]["name"], "work");

    let output = run_dbx(&["profile", "remove", "work"], config_dir.path());
    assert!(output.status.success());

    let output = run_dbx(&["profile", "remove", "work"], config_dir.path());
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_profile_set_rejects_bad_url() {
    let config_dir = TempDir::new().unwrap();
    let output = run_dbx(
        &["profile", "set", "bad", "sl.x", "--api-url", "not a url"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_profile_exit_auth() {
    let config_dir = TempDir::new().unwrap();
    let output = run_dbx(
        &["list-files", "/", "--profile", "ghost"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(4));
}
