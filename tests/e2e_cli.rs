//! CLI end-to-end tests
//!
//! Tests for the surgistream command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the surgistream binary
#[allow(deprecated)]
fn surgistream_cmd() -> Command {
    Command::cargo_bin("surgistream").unwrap()
}

/// Write a config with public/private roots under `site` and return its path.
fn write_config(dir: &Path, site: &Path) -> std::path::PathBuf {
    let public = site.join("public").join("files");
    let private = site.join("private").join("files");
    fs::create_dir_all(&public).unwrap();
    fs::create_dir_all(&private).unwrap();

    let config_path = dir.join("surgistream.toml");
    let content = format!(
        r#"
[server]
host = "127.0.0.1"
port = 8123

[[storage.roots]]
name = "public"
path = "{}"
prefixes = ["/files/", "files/"]

[[storage.roots]]
name = "private"
path = "{}"
prefixes = ["/private/files/", "private/files/"]
"#,
        public.display(),
        private.display()
    );
    fs::write(&config_path, content).unwrap();
    config_path
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = surgistream_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = surgistream_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("surgistream"));
}

#[test]
fn test_cli_validate_config() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), &dir.path().join("site"));

    let mut cmd = surgistream_cmd();
    cmd.arg("validate")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("127.0.0.1:8123"))
        .stdout(predicate::str::contains("Storage roots: 2"));
}

#[test]
fn test_cli_validate_finds_config_in_working_dir() {
    let dir = tempdir().unwrap();
    let written = write_config(dir.path(), &dir.path().join("site"));
    fs::rename(&written, dir.path().join("config.toml")).unwrap();

    let mut cmd = surgistream_cmd();
    cmd.current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("127.0.0.1:8123"));
}

#[test]
fn test_cli_validate_rejects_duplicate_roots() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("bad.toml");
    fs::write(
        &config_path,
        r#"
[[storage.roots]]
name = "public"
path = "/tmp/a"

[[storage.roots]]
name = "public"
path = "/tmp/b"
"#,
    )
    .unwrap();

    let mut cmd = surgistream_cmd();
    cmd.arg("validate")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate storage root"));
}

#[test]
fn test_cli_resolve_found() {
    let dir = tempdir().unwrap();
    let site = dir.path().join("site");
    let config_path = write_config(dir.path(), &site);
    fs::write(site.join("private").join("files").join("lap.mp4"), b"12345").unwrap();

    let mut cmd = surgistream_cmd();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("resolve")
        .arg("lap.mp4")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"root\": \"private\""))
        .stdout(predicate::str::contains("\"size\": 5"))
        .stdout(predicate::str::contains("video/mp4"));
}

#[test]
fn test_cli_resolve_missing_lists_searched_paths() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), &dir.path().join("site"));

    let mut cmd = surgistream_cmd();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("resolve")
        .arg("absent.mp4")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Searched:"))
        .stdout(predicate::str::contains("absent.mp4"));
}

#[test]
fn test_cli_resolve_rejects_traversal() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), &dir.path().join("site"));

    let mut cmd = surgistream_cmd();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("resolve")
        .arg("../../etc/passwd")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid path"));
}

#[test]
fn test_cli_list_videos() {
    let dir = tempdir().unwrap();
    let site = dir.path().join("site");
    let config_path = write_config(dir.path(), &site);
    fs::write(site.join("public").join("files").join("Compressed_cam1.mp4"), b"cam").unwrap();
    fs::write(site.join("public").join("files").join("notes.txt"), b"txt").unwrap();

    let mut cmd = surgistream_cmd();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("list-videos")
        .assert()
        .success()
        .stdout(predicate::str::contains("[public] Compressed_cam1.mp4 (3 bytes)"))
        .stdout(predicate::str::contains("Total videos found: 1"))
        .stdout(predicate::str::contains("notes.txt").not());
}
