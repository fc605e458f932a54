//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated data directory and verify
//! outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_stdin(data_dir, args, "")
}

fn run_cli_with_stdin(data_dir: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_breakbell"))
        .args(args)
        .env("BREAKBELL_DATA_DIR", data_dir)
        .env_remove("BREAKBELL_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_clock_formats_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["clock", "3661"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "01:01:01");
}

#[test]
fn test_interval_seeded_json() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["interval", "--count", "50", "--seed", "9", "--json"];
    let (stdout, _, code) = run_cli(dir.path(), &args);
    assert_eq!(code, 0);
    let values: Vec<u64> = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(values.len(), 50);
    assert!(values.iter().all(|v| (180..=300).contains(v)));

    let (again, _, _) = run_cli(dir.path(), &args);
    assert_eq!(stdout, again);
}

#[test]
fn test_theme_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["theme", "show"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "light");

    let (stdout, _, _) = run_cli(dir.path(), &["theme", "toggle"]);
    assert_eq!(stdout.trim(), "dark");
    let (stdout, _, _) = run_cli(dir.path(), &["theme", "show"]);
    assert_eq!(stdout.trim(), "dark");

    let (stdout, _, _) = run_cli(dir.path(), &["theme", "set", "light"]);
    assert_eq!(stdout.trim(), "light");
}

#[test]
fn test_theme_set_rejects_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["theme", "set", "sepia"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "audio.fade_in_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "4");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "audio.enabled", "false"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "audio.enabled"]);
    assert_eq!(stdout.trim(), "false");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_show_lists_documented_keys() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "show"]);
    assert_eq!(code, 0);
    let shown: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(shown["audio"]["fade_in_secs"], 4);
    assert_eq!(shown["ui"]["break_overlay"], true);
    assert_eq!(shown["ui"]["show_next_break"], false);

    let (listed, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert_eq!(listed, stdout);
}

#[test]
fn test_run_accepts_autostart_and_seed() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["run", "--json", "--no-audio", "--autostart", "--seed", "3"];
    let (stdout, _, code) = run_cli_with_stdin(dir.path(), &args, "q\n");
    assert_eq!(code, 0);
    let started: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .filter(|v: &serde_json::Value| v["type"] == "TimerStarted")
        .collect();
    assert_eq!(started.len(), 1);
    let next_break_at = started[0]["next_break_at"].as_u64().unwrap();
    assert!((180..=300).contains(&next_break_at));
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "audio.bogus", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_run_json_quits_on_q() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) =
        run_cli_with_stdin(dir.path(), &["run", "--json", "--no-audio"], "s\nr\nq\n");
    assert_eq!(code, 0);

    let kinds: Vec<String> = stdout
        .lines()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            v["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds.first().map(String::as_str), Some("StateSnapshot"));
    assert!(kinds.iter().any(|k| k == "TimerStarted"));
    assert!(kinds.iter().any(|k| k == "TimerReset"));
    assert_eq!(kinds.last().map(String::as_str), Some("StateSnapshot"));
}

#[test]
fn test_run_exits_when_stdin_closes() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli_with_stdin(dir.path(), &["run", "--json", "--no-audio"], "");
    assert_eq!(code, 0);
}
