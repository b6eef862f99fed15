//! Integration tests for the dbx CLI
//!
//! These tests talk to a real Dropbox account. Everything they create lives
//! under a unique folder below `/dbx-integration`.
//!
//! Run with:
//! ```bash
//! DBX_TEST_TOKEN=sl.... cargo test -p dbx-cli --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::TempDir;

/// Token for the test account, if configured
fn test_token() -> Option<String> {
    std::env::var("DBX_TEST_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
}

fn run_dbx(args: &[&str], config_dir: &Path, token: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dbx"))
        .args(args)
        .env("DBX_CONFIG_DIR", config_dir)
        .env("DBX_ACCESS_TOKEN", token)
        .env("RUST_LOG", "off")
        .env_remove("DBX_PROFILE")
        .output()
        .expect("Failed to execute dbx command")
}

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{nanos}", std::process::id())
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// Creates `<base>/dir1/{subdir1/subsubdir1,subdir2}` and returns `<base>`
fn create_tree(config_dir: &Path, token: &str) -> String {
    let base = format!("/dbx-integration/run-{}", unique_suffix());
    for folder in [
        format!("{base}/dir1"),
        format!("{base}/dir1/subdir1"),
        format!("{base}/dir1/subdir1/subsubdir1"),
        format!("{base}/dir1/subdir2"),
    ] {
        let output = run_dbx(&["create-subdir", &folder], config_dir, token);
        assert!(
            output.status.success(),
            "create-subdir {folder} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    base
}

#[test]
fn test_subtree_listing_is_depth_first() {
    let Some(token) = test_token() else {
        eprintln!("Skipping: DBX_TEST_TOKEN not set");
        return;
    };
    let config_dir = TempDir::new().unwrap();
    let base = create_tree(config_dir.path(), &token);

    let output = run_dbx(
        &["list-subdirs", &format!("{base}/dir1"), "--json"],
        config_dir.path(),
        &token,
    );
    assert!(output.status.success());

    let listed = stdout_json(&output);
    assert_eq!(listed["complete"], true);
    let folders: Vec<&str> = listed["folders"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();

    let subdir1 = folders
        .iter()
        .position(|f| *f == format!("{base}/dir1/subdir1"))
        .unwrap();
    let subsub = folders
        .iter()
        .position(|f| *f == format!("{base}/dir1/subdir1/subsubdir1"))
        .unwrap();
    assert_eq!(folders.len(), 3);
    assert_eq!(subsub, subdir1 + 1);
}

#[test]
fn test_upload_list_and_retrieve() {
    let Some(token) = test_token() else {
        eprintln!("Skipping: DBX_TEST_TOKEN not set");
        return;
    };
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let base = format!("/dbx-integration/run-{}", unique_suffix());

    let local = work.path().join("report.txt");
    std::fs::write(&local, b"file content").unwrap();

    let output = run_dbx(
        &["push-file", local.to_str().unwrap(), &base, "--json"],
        config_dir.path(),
        &token,
    );
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout_json(&output)["size_bytes"], 12);

    let output = run_dbx(&["list-files", &base, "--json"], config_dir.path(), &token);
    assert!(output.status.success());
    let listed = stdout_json(&output);
    assert_eq!(listed["files"][0]["name"], "report.txt");
    assert_eq!(listed["files"][0]["extension"], ".txt");
    assert_eq!(listed["files"][0]["size"], 12);

    let download_dir = TempDir::new().unwrap();
    let output = run_dbx(
        &[
            "retrieve-file",
            &format!("{base}/report.txt"),
            download_dir.path().to_str().unwrap(),
        ],
        config_dir.path(),
        &token,
    );
    assert!(output.status.success());
    assert_eq!(
        std::fs::read(download_dir.path().join("report.txt")).unwrap(),
        b"file content"
    );
}

#[test]
fn test_missing_remote_file_is_not_found() {
    let Some(token) = test_token() else {
        eprintln!("Skipping: DBX_TEST_TOKEN not set");
        return;
    };
    let config_dir = TempDir::new().unwrap();
    let download_dir = TempDir::new().unwrap();

    let output = run_dbx(
        &[
            "retrieve-file",
            &format!("/dbx-integration/missing-{}.txt", unique_suffix()),
            download_dir.path().to_str().unwrap(),
            "--json",
        ],
        config_dir.path(),
        &token,
    );

    assert_eq!(output.status.code(), Some(5));
    let fault: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(fault["category"], "remote");
}

#[test]
fn test_create_existing_folder_is_conflict() {
    let Some(token) = test_token() else {
        eprintln!("Skipping: DBX_TEST_TOKEN not set");
        return;
    };
    let config_dir = TempDir::new().unwrap();
    let folder = format!("/dbx-integration/run-{}", unique_suffix());

    let output = run_dbx(&["create-subdir", &folder], config_dir.path(), &token);
    assert!(output.status.success());

    let output = run_dbx(&["create-subdir", &folder], config_dir.path(), &token);
    assert_eq!(output.status.code(), Some(6));
}
