//! End-to-end tests for the `sl` binary.
//!
//! Each test writes log files into a temp dir and runs the real binary with
//! `HOME` pointed there, so no user config leaks in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn sl_binary() -> String {
    env!("CARGO_BIN_EXE_sl").to_string()
}

fn run_sl(home: &Path, args: &[&str]) -> Output {
    Command::new(sl_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("SL_STRICT")
        .env_remove("SL_FORMAT")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run sl")
}

fn write_log(temp: &TempDir, name: &str, lines: &[&str]) -> String {
    let path = temp.path().join(name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Two users, every session closed inside the log.
#[test]
fn test_balanced_log_report() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        &temp,
        "balanced.log",
        &[
            "14:02:03 ALICE99 Start",
            "14:02:34 ALICE99 End",
            "14:03:02 CHARLIE Start",
            "14:03:37 CHARLIE End",
            "14:04:58 ALICE99 Start",
            "14:05:02 ALICE99 End",
        ],
    );

    let output = run_sl(temp.path(), &[&log]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "ALICE99 2 35\nCHARLIE 1 35\n");
}

/// Sessions open at either end of the log are clamped to its first and last
/// lines; malformed lines in between are skipped.
#[test]
fn test_open_sessions_and_malformed_lines() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        &temp,
        "open.log",
        &[
            "14:02:03 ALICE99 Start",
            "14:02:05 CHARLIE End",
            "14:02:30 CHARLIE",
            "14:02:34 ALICE99 End",
            "14:02:58 ALICE99 Start",
            "14:03:00 _bad Start",
            "14:03:02 CHARLIE Start",
            "14:03:33 ALICE99 Start",
            "14:03:35 ALICE99 End",
            "14:03:36 CHARLIE Logout",
            "14:03:37 CHARLIE End",
            "14:04:05 ALICE99 End",
            "14:04:23 ALICE99 End",
            "14:04:41 CHARLIE Start",
        ],
    );

    let output = run_sl(temp.path(), &[&log]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "ALICE99 4 240\nCHARLIE 3 37\n");
}

/// Missing and empty files print nothing, and later files are still reported.
#[test]
fn test_unusable_files_do_not_stop_the_run() {
    let temp = TempDir::new().unwrap();
    let empty = write_log(&temp, "empty.log", &[]);
    let junk = write_log(&temp, "junk.log", &["hello world", "12:00:00 bob Nap"]);
    let good = write_log(&temp, "good.log", &["09:00:00 bob Start", "09:01:40 bob End"]);
    let missing = temp.path().join("missing.log").to_string_lossy().into_owned();

    let output = run_sl(temp.path(), &[&missing, &empty, &junk, &good]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "bob 1 100\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no report"), "stderr: {stderr}");
}

/// Each file gets its own report block; windows are not shared across files.
#[test]
fn test_multiple_files_are_independent() {
    let temp = TempDir::new().unwrap();
    let first = write_log(&temp, "a.log", &["10:00:00 ann Start", "10:00:10 ann End"]);
    let second = write_log(&temp, "b.log", &["11:00:00 ann End", "11:00:30 ben Start"]);

    let output = run_sl(temp.path(), &[&first, &second]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "ann 1 10\nann 1 0\nben 1 0\n");
}

#[test]
fn test_missing_arguments_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let output = run_sl(temp.path(), &[]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "a.log", &["10:00:00 ann Start", "10:00:10 ann End"]);

    let output = run_sl(temp.path(), &["--json", &log]);

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([{"user": "ann", "sessions": 1, "total_seconds": 10}])
    );
}

/// Strict mode skips the malformed file, still reports the clean one, and
/// exits non-zero.
#[test]
fn test_strict_mode() {
    let temp = TempDir::new().unwrap();
    let bad = write_log(&temp, "bad.log", &["10:00:00 ann Start", "oops", "10:00:10 ann End"]);
    let good = write_log(&temp, "good.log", &["10:00:00 ann Start", "10:00:10 ann End"]);

    let output = run_sl(temp.path(), &["--strict", &bad, &good]);

    assert!(!output.status.success());
    assert_eq!(stdout(&output), "ann 1 10\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
}

/// Strict mode can also come from the config file.
#[test]
fn test_strict_mode_from_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("sl.toml");
    std::fs::write(&config, "strict = true\n").unwrap();
    let config = config.to_string_lossy().into_owned();
    let bad = write_log(&temp, "bad.log", &["10:00:00 ann Start", "oops"]);

    let output = run_sl(temp.path(), &["--config", &config, &bad]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}
