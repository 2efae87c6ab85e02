//! Basic CLI E2E tests.
//!
//! Tests invoke the built `pomo` binary against a throwaway data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pomo"))
        .args(args)
        .env("POMO_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_settings_show_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = run_json(dir.path(), &["settings", "show"]);
    assert_eq!(settings["workMinutes"], 25);
    assert_eq!(settings["breakMinutes"], 5);
    assert_eq!(settings["longBreakMinutes"], 15);
    assert_eq!(settings["sessionsUntilLongBreak"], 4);
    assert_eq!(settings["soundEnabled"], true);
    assert_eq!(settings["notificationsEnabled"], false);
}

#[test]
fn test_settings_set_clamps_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let updated = run_json(
        dir.path(),
        &[
            "settings",
            "set",
            "--work-minutes",
            "999",
            "--break-minutes",
            "abc",
            "--sessions-until-long-break",
            "3",
            "--notifications",
            "true",
        ],
    );
    assert_eq!(updated["workMinutes"], 60);
    assert_eq!(updated["breakMinutes"], 5);
    assert_eq!(updated["sessionsUntilLongBreak"], 3);
    assert_eq!(updated["notificationsEnabled"], true);

    let shown = run_json(dir.path(), &["settings", "show"]);
    assert_eq!(shown, updated);
}

#[test]
fn test_settings_set_keeps_unspecified_fields() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["settings", "set", "--long-break-minutes", "20"]);
    let shown = run_json(dir.path(), &["settings", "set", "--work-minutes", "30"]);
    assert_eq!(shown["longBreakMinutes"], 20);
    assert_eq!(shown["workMinutes"], 30);
}

#[test]
fn test_settings_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["settings", "set", "--work-minutes", "45"]);
    let reset = run_json(dir.path(), &["settings", "reset"]);
    assert_eq!(reset["workMinutes"], 25);
}

#[test]
fn test_stats_today_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let stats = run_json(dir.path(), &["stats", "today", "--json"]);
    assert_eq!(stats["completedSessions"], 0);
    assert_eq!(stats["totalFocusSeconds"], 0);
    assert!(stats["date"].is_string());
}

#[test]
fn test_config_path_is_inside_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(Path::new(stdout.trim()).starts_with(dir.path()));
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_show_prints_toml() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("refresh_interval_ms = 100"));
}

#[test]
fn test_broken_config_warns_and_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[display\nrefresh_interval_ms = ").unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["settings", "show"]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stderr.contains("using default configuration"), "stderr: {stderr}");
    let settings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(settings["workMinutes"], 25);
}

#[test]
fn test_unknown_command_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["bogus"]);
    assert_ne!(code, 0);
}
