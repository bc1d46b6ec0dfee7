//! Integration tests for zipscrub-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const PLACEHOLDER: &[u8] = b"\x89PNG\r\n\x1a\nplaceholder";

fn zipscrub_cmd() -> Command {
    cargo_bin_cmd!("zipscrub")
}

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn sample_zip() -> Vec<u8> {
    build_zip(&[
        ("icon.png", b"original image"),
        ("LICENSE", b"MIT"),
        ("info.json", b"{}"),
    ])
}

fn read_zip(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(fs::read(path).unwrap())).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (entry.name().to_string(), data)
        })
        .collect()
}

/// Working directory with a placeholder and a `mods/` tree.
fn workspace() -> TempDir {
    let temp = TempDir::new().expect("failed to create temp dir");
    fs::write(temp.path().join("placeholder.png"), PLACEHOLDER).unwrap();
    fs::create_dir_all(temp.path().join("mods/nested")).unwrap();
    temp
}

#[test]
fn test_version_flag() {
    zipscrub_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zipscrub"));
}

#[test]
fn test_help_flag() {
    zipscrub_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("placeholder"))
        .stdout(predicate::str::contains("--path"));
}

#[test]
fn test_missing_placeholder_exits_early() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("pack.zip");
    fs::write(&archive, sample_zip()).unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Placeholder PNG file not found at ./placeholder.png",
        ))
        .stdout(predicate::str::contains("Processing complete.").not());

    assert_eq!(fs::read(&archive).unwrap(), sample_zip());
}

#[test]
fn test_scrub_with_go_style_path_flag() {
    let temp = workspace();
    let archive = temp.path().join("mods/nested/pack.zip");
    fs::write(&archive, sample_zip()).unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .arg("-path")
        .arg("mods")
        .assert()
        .success()
        .stdout(predicate::str::contains("Excluding file LICENSE"))
        .stdout(predicate::str::contains("Processing complete."));

    let entries = read_zip(&archive);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], ("icon.png".to_string(), PLACEHOLDER.to_vec()));
    assert_eq!(entries[1], ("info.json".to_string(), b"{}".to_vec()));
}

#[test]
fn test_scrub_with_equals_path_flag() {
    let temp = workspace();
    let archive = temp.path().join("mods/pack.zip");
    fs::write(&archive, sample_zip()).unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .arg("-path=mods")
        .assert()
        .success();

    assert_eq!(read_zip(&archive).len(), 2);
}

#[test]
fn test_default_path_is_working_directory() {
    let temp = workspace();
    let archive = temp.path().join("mods/pack.zip");
    fs::write(&archive, sample_zip()).unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing complete."));

    assert_eq!(read_zip(&archive)[0].1, PLACEHOLDER);
}

#[test]
fn test_corrupted_archive_is_deleted() {
    let temp = workspace();
    let good = temp.path().join("mods/a.zip");
    let bad = temp.path().join("mods/b.zip");
    fs::write(&good, sample_zip()).unwrap();
    fs::write(&bad, b"PK not really").unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--path", "mods"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error processing zip file"))
        .stdout(predicate::str::contains("b.zip"))
        .stdout(predicate::str::contains("Processing complete."));

    assert!(!bad.exists());
    assert_eq!(read_zip(&good).len(), 2);
}

#[test]
fn test_failure_line_names_archive_once() {
    let temp = workspace();
    fs::write(temp.path().join("mods/broken.zip"), b"PK not really").unwrap();

    let output = zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--path", "mods"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let line = stdout
        .lines()
        .find(|l| l.contains("Error processing zip file"))
        .expect("missing failure line");
    assert_eq!(line.matches("broken.zip").count(), 1, "{line}");
    assert!(line.contains("could not open zip file"));
}

#[test]
fn test_exclusions_printed_before_failure() {
    let temp = workspace();
    let payload = b"stored manifest payload";
    let mut source = build_zip(&[("LICENSE", b"MIT"), ("mod.json", payload)]);
    let pos = source
        .windows(payload.len())
        .position(|w| w == payload)
        .unwrap();
    source[pos] = b'X';
    fs::write(temp.path().join("mods/bad.zip"), source).unwrap();

    let output = zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--path", "mods"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let excluded = stdout.find("Excluding file LICENSE").expect("missing exclusion");
    let failed = stdout.find("Error processing zip file").expect("missing failure");
    assert!(excluded < failed, "{stdout}");
    assert!(!temp.path().join("mods/bad.zip").exists());
}

#[test]
fn test_keep_failed_preserves_archive() {
    let temp = workspace();
    let bad = temp.path().join("mods/b.zip");
    fs::write(&bad, b"PK not really").unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--path", "mods", "--keep-failed"])
        .assert()
        .success();

    assert_eq!(fs::read(&bad).unwrap(), b"PK not really");
}

#[test]
fn test_json_output() {
    let temp = workspace();
    fs::write(temp.path().join("mods/a.zip"), sample_zip()).unwrap();
    fs::write(temp.path().join("mods/b.zip"), b"garbage").unwrap();

    let output = zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--json", "--path", "mods", "--jobs", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "scrub");
    assert_eq!(json["data"]["archives_found"], 2);
    assert_eq!(json["data"]["archives_rewritten"], 1);
    assert_eq!(json["data"]["archives_deleted"], 1);
    assert_eq!(json["data"]["entries_excluded"], 1);
    assert_eq!(json["data"]["workers"], 2);
    assert_eq!(json["data"]["failures"][0]["stage"], "open");
}

#[test]
fn test_json_missing_placeholder() {
    let temp = TempDir::new().unwrap();

    let output = zipscrub_cmd()
        .current_dir(temp.path())
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "error");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Placeholder PNG file not found")
    );
}

#[test]
fn test_quiet_suppresses_output() {
    let temp = workspace();
    fs::write(temp.path().join("mods/a.zip"), sample_zip()).unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--quiet", "--path", "mods"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_prints_summary() {
    let temp = workspace();
    fs::write(temp.path().join("mods/a.zip"), sample_zip()).unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--verbose", "--path", "mods"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archives rewritten: 1"))
        .stdout(predicate::str::contains("Images replaced:    1"))
        .stdout(predicate::str::contains("Archives failed").not());
}

#[test]
fn test_verbose_summary_counts_failures() {
    let temp = workspace();
    fs::write(temp.path().join("mods/a.zip"), sample_zip()).unwrap();
    fs::write(temp.path().join("mods/b.zip"), b"garbage").unwrap();

    zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--verbose", "--path", "mods"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archives failed:    1 (1 deleted)"));
}

#[test]
fn test_zero_jobs_rejected() {
    zipscrub_cmd()
        .args(["--jobs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--jobs"));
}

#[test]
fn test_missing_root_still_completes() {
    let temp = workspace();

    zipscrub_cmd()
        .current_dir(temp.path())
        .args(["--path", "does-not-exist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("error walking the directory"))
        .stdout(predicate::str::contains("Processing complete."));
}
