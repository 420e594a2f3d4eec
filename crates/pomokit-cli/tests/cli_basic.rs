//! Basic CLI E2E tests.
//!
//! Every test runs the binary against its own data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn pomokit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomokit").unwrap();
    cmd.env("POMOKIT_DATA_DIR", dir.path())
        .env("POMOKIT_LOG", "off");
    cmd
}

fn stdout_json(dir: &TempDir, args: &[&str]) -> Value {
    let output = pomokit(dir).args(args).output().unwrap();
    assert!(output.status.success(), "{args:?} failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

fn add_task(dir: &TempDir, title: &str, est: &str) -> String {
    let task = stdout_json(dir, &["task", "add", title, "--category", "Study", "--est", est]);
    task["id"].as_str().unwrap().to_string()
}

#[test]
fn test_task_add_and_list() {
    let dir = TempDir::new().unwrap();

    pomokit(&dir)
        .args(["task", "add", "  Read chapter 3  "])
        .assert()
        .success()
        .stderr(predicate::str::contains("Task created"))
        .stdout(predicate::str::contains("\"title\": \"Read chapter 3\""));
    add_task(&dir, "Essay", "2");

    let tasks = stdout_json(&dir, &["task", "list"]);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Essay");
    assert_eq!(tasks[1]["category"], "General");
}

#[test]
fn test_task_add_rejects_blank_title() {
    let dir = TempDir::new().unwrap();
    pomokit(&dir)
        .args(["task", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_task_toggle_and_delete() {
    let dir = TempDir::new().unwrap();
    let id = add_task(&dir, "Stretch", "1");

    pomokit(&dir)
        .args(["task", "toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));
    let pending = stdout_json(&dir, &["task", "list", "--pending"]);
    assert!(pending.as_array().unwrap().is_empty());

    pomokit(&dir).args(["task", "delete", &id]).assert().success();
    pomokit(&dir).args(["task", "delete", &id]).assert().failure();
}

#[test]
fn test_settings_clamp_and_reset() {
    let dir = TempDir::new().unwrap();

    pomokit(&dir)
        .args(["settings", "set", "workMin", "500"])
        .assert()
        .success()
        .stdout("180\n");
    pomokit(&dir)
        .args(["settings", "get", "work_min"])
        .assert()
        .success()
        .stdout("180\n");
    pomokit(&dir)
        .args(["settings", "set", "longEvery", "abc"])
        .assert()
        .success()
        .stdout("4\n");

    pomokit(&dir).args(["settings", "reset"]).assert().success();
    let settings = stdout_json(&dir, &["settings", "list"]);
    assert_eq!(settings["workMin"], 25);
    assert_eq!(settings["goalPerDay"], 6);

    pomokit(&dir)
        .args(["settings", "get", "volume"])
        .assert()
        .failure();
}

#[test]
fn test_timer_run_credits_task() {
    let dir = TempDir::new().unwrap();
    pomokit(&dir)
        .args(["settings", "set", "workMin", "1"])
        .assert()
        .success();
    let id = add_task(&dir, "Essay", "1");

    let output = pomokit(&dir)
        .args(["timer", "run", "--task", &id, "--phases", "1", "--tick-ms", "1", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: Vec<Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let completed = events
        .iter()
        .find(|e| e["type"] == "PhaseCompleted")
        .expect("phase completed event");
    assert_eq!(completed["from"], "work");
    assert_eq!(completed["to"], "short");
    assert_eq!(completed["donePoms"], 1);
    assert_eq!(completed["taskCompleted"], true);
    assert_eq!(events.last().unwrap()["type"], "TimerPaused");

    let tasks = stdout_json(&dir, &["task", "list"]);
    assert_eq!(tasks[0]["donePoms"], 1);
    assert_eq!(tasks[0]["completed"], true);

    let today = stdout_json(&dir, &["stats", "today"]);
    assert_eq!(today["todayCount"], 1);
    assert_eq!(today["goalPercent"], 17);

    let streak = stdout_json(&dir, &["stats", "streak"]);
    assert_eq!(streak["current"], 1);
    assert_eq!(streak["best"], 1);
}

#[test]
fn test_timer_run_rejects_unknown_task() {
    let dir = TempDir::new().unwrap();
    pomokit(&dir)
        .args(["timer", "run", "--task", "missing", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_timer_status() {
    let dir = TempDir::new().unwrap();
    let status = stdout_json(&dir, &["timer", "status"]);
    assert_eq!(status["display"], "25:00");
    assert_eq!(status["timer"]["mode"], "work");
    assert_eq!(status["todayCount"], 0);
}

#[test]
fn test_stats_week_has_seven_days() {
    let dir = TempDir::new().unwrap();
    let week = stdout_json(&dir, &["stats", "week"]);
    assert_eq!(week.as_array().unwrap().len(), 7);
}

#[test]
fn test_backup_round_trip() {
    let source = TempDir::new().unwrap();
    pomokit(&source)
        .args(["settings", "set", "goalPerDay", "10"])
        .assert()
        .success();
    add_task(&source, "Essay", "3");
    let file = source.path().join("backup.json");
    pomokit(&source)
        .args(["backup", "export", "--output"])
        .arg(&file)
        .assert()
        .success();

    let target = TempDir::new().unwrap();
    pomokit(&target)
        .args(["backup", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 tasks restored"));

    let settings = stdout_json(&target, &["settings", "list"]);
    assert_eq!(settings["goalPerDay"], 10);
    let tasks = stdout_json(&target, &["task", "list"]);
    assert_eq!(tasks[0]["title"], "Essay");
}

#[test]
fn test_malformed_backup_changes_nothing() {
    let dir = TempDir::new().unwrap();
    add_task(&dir, "Keep me", "1");
    let file = dir.path().join("bad.json");
    std::fs::write(&file, "{\"tasks\": [{\"title\": 3}]}").unwrap();

    pomokit(&dir)
        .args(["backup", "import"])
        .arg(&file)
        .assert()
        .failure();

    let tasks = stdout_json(&dir, &["task", "list"]);
    assert_eq!(tasks[0]["title"], "Keep me");
}

#[test]
fn test_data_clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    add_task(&dir, "Essay", "1");

    pomokit(&dir)
        .args(["data", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(stdout_json(&dir, &["task", "list"]).as_array().unwrap().len(), 1);

    pomokit(&dir).args(["data", "clear", "--yes"]).assert().success();
    assert!(stdout_json(&dir, &["task", "list"]).as_array().unwrap().is_empty());
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();

    pomokit(&dir)
        .args(["config", "get", "cue.work_done_hz"])
        .assert()
        .success()
        .stdout("880\n");
    pomokit(&dir)
        .args(["config", "set", "notifications.enabled", "false"])
        .assert()
        .success();
    pomokit(&dir)
        .args(["config", "get", "notifications.enabled"])
        .assert()
        .success()
        .stdout("false\n");
    pomokit(&dir)
        .args(["config", "get", "no_such_key"])
        .assert()
        .failure();
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    pomokit(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomokit"));
}
