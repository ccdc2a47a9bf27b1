//! Integration tests for the cast2gif binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::temp_fixture;

/// cast2gif with an isolated, empty config file
fn cast2gif(config_dir: &Path) -> Command {
    let config = config_dir.join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("cast2gif").unwrap();
    cmd.arg("--config").arg(config).env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and usage
// ============================================================================

#[test]
fn help_exits_0_and_describes_tool() {
    let temp_dir = TempDir::new().unwrap();

    cast2gif(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("animated GIF"))
        .stdout(predicate::str::contains("<INPUT>"))
        .stdout(predicate::str::contains("<OUTPUT>"));
}

#[test]
fn missing_arguments_print_usage() {
    let temp_dir = TempDir::new().unwrap();

    cast2gif(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_output_argument_prints_usage() {
    let (temp_dir, input) = temp_fixture("hello.cast");

    cast2gif(temp_dir.path())
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<OUTPUT>"));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn converts_recording_and_reports_progress() {
    let (temp_dir, input) = temp_fixture("sample.cast");
    let output = temp_dir.path().join("sample.gif");

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("GIF created at"))
        .stdout(predicate::str::contains("sample.gif"))
        .stdout(predicate::str::contains("5 frames from 3 snapshots"));

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}

#[test]
fn verbose_run_logs_recording_title() {
    let (temp_dir, input) = temp_fixture("sample.cast");

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(temp_dir.path().join("sample.gif"))
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("converting recording"))
        .stderr(predicate::str::contains("demo"));
}

#[test]
fn header_only_recording_still_produces_gif() {
    let (temp_dir, input) = temp_fixture("header_only.cast");
    let output = temp_dir.path().join("empty.gif");

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 frames from 1 snapshots"));

    assert!(output.exists());
}

#[test]
fn flags_are_accepted() {
    let (temp_dir, input) = temp_fixture("hello.cast");
    let output = temp_dir.path().join("hello.gif");

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(&output)
        .args(["--fps", "10", "--font-size", "12", "--max-width", "320"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3s"));
}

#[test]
fn unloadable_font_warns_and_still_converts() {
    let (temp_dir, input) = temp_fixture("hello.cast");
    let output = temp_dir.path().join("hello.gif");

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(&output)
        .arg("--font")
        .arg(temp_dir.path().join("missing.ttf"))
        .assert()
        .success()
        .stderr(predicate::str::contains("missing.ttf could not be loaded"));

    assert!(output.exists());
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn missing_input_exits_1_with_usage() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.gif");

    cast2gif(temp_dir.path())
        .arg(temp_dir.path().join("nonexistent.cast"))
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("nonexistent.cast"))
        .stderr(predicate::str::contains("Usage"));

    assert!(!output.exists());
}

#[test]
fn directory_input_exits_1_with_usage() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.gif");

    cast2gif(temp_dir.path())
        .arg(temp_dir.path())
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("Usage"));

    assert!(!output.exists());
}

#[test]
fn fps_above_limit_is_rejected() {
    let (temp_dir, input) = temp_fixture("hello.cast");
    let output = temp_dir.path().join("out.gif");

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(&output)
        .args(["--fps", "500"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--fps"));

    assert!(!output.exists());
}

#[test]
fn fps_above_limit_in_config_exits_1() {
    let (temp_dir, input) = temp_fixture("hello.cast");
    fs::write(temp_dir.path().join("config.toml"), "[timing]\nfps = 500\n").unwrap();

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(temp_dir.path().join("out.gif"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("between 1 and 100"));
}

#[test]
fn malformed_input_names_the_line() {
    let (temp_dir, input) = temp_fixture("malformed.cast");
    let output = temp_dir.path().join("out.gif");

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 3"));

    assert!(!output.exists());
}

#[test]
fn unwritable_output_exits_1() {
    let (temp_dir, input) = temp_fixture("hello.cast");
    let output = temp_dir.path().join("missing-dir").join("out.gif");

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to write"));
}

#[test]
fn invalid_config_exits_1() {
    let (temp_dir, input) = temp_fixture("hello.cast");
    fs::write(
        temp_dir.path().join("config.toml"),
        "[render]\nbackground = \"blue\"\n",
    )
    .unwrap();

    cast2gif(temp_dir.path())
        .arg(&input)
        .arg(temp_dir.path().join("out.gif"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("background"));
}
