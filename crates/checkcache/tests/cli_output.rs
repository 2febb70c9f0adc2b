//! Integration tests for the checkcache binary.
//!
//! Each test points HOME and the cache directory at its own temp dir so
//! nothing leaks between tests or into the real user cache.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

use tempfile::TempDir;

struct Sandbox {
    home: TempDir,
    cache_dir: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let home = TempDir::new().expect("Failed to create temp dir");
        let cache_dir = home.path().join("cache");
        Self { home, cache_dir }
    }

    fn with_cache_dir(cache_dir: PathBuf) -> Self {
        let home = TempDir::new().expect("Failed to create temp dir");
        Self { home, cache_dir }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_checkcache"))
            .args(args)
            .env("HOME", self.home.path())
            .env("CHECKCACHE_CACHE_DIR", &self.cache_dir)
            .env_remove("RUST_LOG")
            .output()
            .unwrap_or_else(|e| panic!("Failed to execute checkcache {:?}: {}", args, e))
    }

    fn cache_file(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn read_json(path: &Path) -> Option<serde_json::Value> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Wait for the detached refresh to write a settled record.
fn wait_for_settled(path: &Path) -> serde_json::Value {
    let deadline = Instant::now() + Duration::from_secs(20);
    loop {
        if let Some(value) = read_json(path)
            && value["refresh_launched"] == serde_json::Value::Bool(false)
            && value.get("last_runtime").is_some()
        {
            return value;
        }
        assert!(
            Instant::now() < deadline,
            "background refresh never settled {}",
            path.display()
        );
        std::thread::sleep(Duration::from_millis(100));
    }
}

#[test]
fn test_first_check_is_unknown_then_serves_background_result() {
    let sandbox = Sandbox::new();

    let first = sandbox.run(&["check", "-c", "echo 'PING OK'", "-n", "ping"]);
    assert_eq!(first.status.code(), Some(3), "stdout: {}", stdout_of(&first));
    assert!(stdout_of(&first).starts_with("UNKNOWN: "));

    let settled = wait_for_settled(&sandbox.cache_file("ping"));
    assert_eq!(settled["return_code"], 0);
    assert_eq!(settled["stdout"], "PING OK\n");
    assert_eq!(settled["command"], "echo 'PING OK'");

    let second = sandbox.run(&["check", "-c", "echo 'PING OK'", "-n", "ping", "-i", "3600"]);
    assert_eq!(second.status.code(), Some(0));
    assert_eq!(stdout_of(&second), "OK: PING OK - \n");
}

#[test]
fn test_first_check_returns_before_slow_command_finishes() {
    let sandbox = Sandbox::new();

    let started = Instant::now();
    let output = sandbox.run(&["check", "-c", "sleep 5; echo done", "-n", "slow"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(
        started.elapsed() < Duration::from_secs(4),
        "check should not wait for the command"
    );

    let in_flight = read_json(&sandbox.cache_file("slow")).expect("cache file should exist");
    assert_eq!(in_flight["refresh_launched"], true);

    let settled = wait_for_settled(&sandbox.cache_file("slow"));
    assert_eq!(settled["stdout"], "done\n");
    assert!(settled["last_runtime"].as_f64().unwrap() >= 4.0);
}

#[test]
fn test_unwritable_cache_dir_is_critical() {
    let blocker = TempDir::new().unwrap();
    let file = blocker.path().join("regular-file");
    std::fs::write(&file, "x").unwrap();
    let sandbox = Sandbox::with_cache_dir(file.join("cache"));

    let output = sandbox.run(&["check", "-c", "true", "-n", "nope"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_of(&output).starts_with("CRITICAL: "));
}

#[test]
fn test_refresh_foreground_then_show() {
    let sandbox = Sandbox::new();

    let refresh = sandbox.run(&[
        "refresh",
        "-c",
        "echo 'LOAD CRITICAL'; echo oops >&2; exit 2",
        "-n",
        "load",
        "--foreground",
    ]);
    assert_eq!(refresh.status.code(), Some(2));
    assert_eq!(stdout_of(&refresh), "CRITICAL: LOAD CRITICAL - oops\n");

    let show = sandbox.run(&["show", "-n", "load"]);
    assert_eq!(show.status.code(), Some(0));
    let record: serde_json::Value = serde_json::from_slice(&show.stdout).unwrap();
    assert_eq!(record["return_code"], 2);
    assert_eq!(record["stderr"], "oops\n");
    assert_eq!(record["refresh_launched"], false);
}

#[test]
fn test_refresh_foreground_timeout() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&[
        "refresh",
        "-c",
        "sleep 30",
        "-n",
        "hung",
        "-t",
        "1",
        "--foreground",
    ]);

    // 124 is outside the plugin range, so it is reported as UNKNOWN.
    assert_eq!(output.status.code(), Some(3));
    let record = read_json(&sandbox.cache_file("hung")).unwrap();
    assert_eq!(record["return_code"], 124);
}

#[test]
fn test_show_missing_cache() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["show", "-n", "absent"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).starts_with("No cached result at "));
}

#[test]
fn test_stdout_has_no_json_logs_by_default() {
    let blocker = TempDir::new().unwrap();
    let file = blocker.path().join("regular-file");
    std::fs::write(&file, "x").unwrap();
    let sandbox = Sandbox::with_cache_dir(file.join("cache"));

    let output = sandbox.run(&["check", "-c", "true", "-n", "quiet"]);
    let stdout = stdout_of(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let blocker = TempDir::new().unwrap();
    let file = blocker.path().join("regular-file");
    std::fs::write(&file, "x").unwrap();
    let sandbox = Sandbox::with_cache_dir(file.join("cache"));

    let output = sandbox.run(&["-v", "check", "-c", "true", "-n", "loud"]);
    let stdout = stdout_of(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(stdout.lines().count(), 1, "stdout: {}", stdout);
    assert!(stderr.contains("core.check.decide_started"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_user_config_is_unknown() {
    let sandbox = Sandbox::new();
    let config_dir = sandbox.home.path().join(".checkcache");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[check]\ntimeout = 0\n").unwrap();

    let output = sandbox.run(&["check", "-c", "true", "-n", "cfg"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stdout_of(&output).starts_with("UNKNOWN: Invalid configuration"));
}

#[test]
fn test_completions() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["completions", "bash"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("checkcache"));
}
