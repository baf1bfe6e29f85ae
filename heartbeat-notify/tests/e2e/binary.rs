//! The compiled binary: exit codes, one-shot runs, signals and file logging

use std::fs;
use std::net::TcpListener;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::Duration;

use heartbeat_notify::config::WatchedFile;
use heartbeat_notify::notifier::stalled_message;
use mockito::Server;
use tempfile::TempDir;

use super::helpers::{config_yaml, content_body, webhook_url, WEBHOOK_PATH};

fn command(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_heartbeat-notify"));
    command
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy");
    command
}

fn run(args: &[&str]) -> Output {
    command(args)
        .output()
        .expect("failed to launch heartbeat-notify")
}

fn run_with_config(config: &Path) -> Output {
    run(&["--config", config.to_str().unwrap()])
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_missing_config_exits_with_failure() {
    let tmp = TempDir::new().unwrap();
    let output = run_with_config(&tmp.path().join("absent.yaml"));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Failed to load configuration"));
}

#[test]
fn test_malformed_config_exits_with_failure() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    fs::write(&config, "files: [unterminated\n").unwrap();

    let output = run_with_config(&config);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_config_names_the_field() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    fs::write(
        &config,
        "files:\n  - name: worker\n    path: /tmp/worker.beat\n    heartbeat_seconds: 0\n",
    )
    .unwrap();

    let output = run_with_config(&config);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr_of(&output).contains("files[0].heartbeat_seconds"),
        "stderr: {}",
        stderr_of(&output)
    );
}

#[test]
fn test_one_shot_with_no_files_exits_cleanly() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    fs::write(&config, config_yaml(None, &[])).unwrap();

    let output = run_with_config(&config);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
}

#[test]
fn test_one_shot_alerts_on_missing_heartbeat() {
    let mut server = Server::new();
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    let beat = tmp.path().join("never.beat");
    fs::write(
        &config,
        config_yaml(Some(&webhook_url(&server)), &[("nightly", &beat, 60)]),
    )
    .unwrap();

    let expected = stalled_message(&WatchedFile {
        name: "nightly".to_string(),
        path: beat.clone(),
        heartbeat_seconds: 60,
        webhook_url: None,
    });
    let mock = server
        .mock("POST", WEBHOOK_PATH)
        .match_body(content_body(&expected))
        .with_status(204)
        .expect(1)
        .create();

    let output = run(&["--config", config.to_str().unwrap(), "--interval", "0"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    mock.assert();
}

#[test]
fn test_log_file_receives_events() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    let log = tmp.path().join("logs/monitor.log");
    fs::write(
        &config,
        format!("files: []\nlog_file: {}\n", log.display()),
    )
    .unwrap();

    let output = run_with_config(&config);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let logged = fs::read_to_string(&log).unwrap();
    assert!(logged.contains("loaded configuration"));
    assert!(!logged.contains("\u{1b}["), "file log should not contain ANSI codes");
}

#[test]
fn test_version_flag() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("heartbeat-notify"));
}

/// Send `signal` to a running child via the `kill` utility
#[cfg(unix)]
fn send_signal(child: &Child, signal: &str) {
    let status = Command::new("kill")
        .args([signal, &child.id().to_string()])
        .status()
        .expect("failed to run kill");
    assert!(status.success());
}

#[cfg(unix)]
#[test]
fn test_terminate_stops_interval_run_cleanly() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    fs::write(&config, config_yaml(None, &[])).unwrap();

    let mut child = command(&["--config", config.to_str().unwrap(), "--interval", "3600"])
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    thread::sleep(Duration::from_millis(500));
    send_signal(&child, "-TERM");

    let status = child.wait().unwrap();
    assert!(status.success(), "exit status: {status}");
}

#[cfg(unix)]
#[test]
fn test_interrupt_during_one_shot_exits_cleanly() {
    // Accepts connections but never answers, so the alert blocks until the request times out
    let silent = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}{WEBHOOK_PATH}", silent.local_addr().unwrap());

    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    let beat = tmp.path().join("never.beat");
    fs::write(&config, config_yaml(Some(&url), &[("nightly", &beat, 60)])).unwrap();

    let mut child = command(&["--config", config.to_str().unwrap()])
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    thread::sleep(Duration::from_millis(500));
    send_signal(&child, "-INT");

    let status = child.wait().unwrap();
    assert!(status.success(), "exit status: {status}");
    drop(silent);
}
