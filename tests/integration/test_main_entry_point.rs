// main.rsとエントリーポイントのテスト
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_email_pipeline"))
}

#[test]
fn test_cli_help() {
    let output = binary().arg("--help").output().expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--producers"));
    assert!(stdout.contains("--consumers"));
    assert!(stdout.contains("--capacity"));
}

#[test]
fn test_default_run_without_arguments() {
    let output = binary().output().expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let produced = stdout.lines().filter(|l| l.ends_with("produced job something")).count();
    let consumed = stdout.lines().filter(|l| l.ends_with("consumed job something")).count();
    assert_eq!(produced, 15);
    assert_eq!(consumed, 15);
}

#[test]
fn test_summary_json_output() {
    let output = binary()
        .args(["--pause-ms", "0", "--producers", "2", "--summary-json"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').expect("summary JSON missing");
    let summary: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();

    assert_eq!(summary["produced"], 10);
    assert_eq!(summary["consumed"], 10);
    assert_eq!(summary["undelivered"], 0);
}

#[test]
fn test_config_file_argument() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pipeline.json");
    fs::write(&path, r#"{"producers": 1, "consumers": 1, "jobs_per_producer": 2, "pause_ms": 0}"#)
        .unwrap();

    let output = binary()
        .arg("--config")
        .arg(&path)
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().filter(|l| l.contains("produced job")).count(), 2);
}

#[test]
fn test_deadlock_prone_configuration_fails() {
    let output = binary()
        .args(["--consumers", "0", "--pause-ms", "0"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("設定エラー"));
}
