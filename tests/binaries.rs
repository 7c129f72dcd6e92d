// tests/binaries.rs

//! End-to-end tests running the real launcher and worker binaries.

use std::process::Command;
use std::time::{Duration, Instant};

#[test]
fn worker_prints_start_and_workload_time_lines() {
    let out = Command::new(env!("CARGO_BIN_EXE_tickrun-worker"))
        .arg("7")
        .output()
        .expect("worker binary should run");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("job 7: pid = "), "stdout was: {stdout}");
    assert!(
        stdout.contains("job 7: workload time = "),
        "stdout was: {stdout}"
    );
}

#[test]
fn worker_rejects_bad_arguments() {
    let out = Command::new(env!("CARGO_BIN_EXE_tickrun-worker"))
        .output()
        .expect("worker binary should run");
    assert_eq!(out.status.code(), Some(1));

    let out = Command::new(env!("CARGO_BIN_EXE_tickrun-worker"))
        .arg("not-a-number")
        .output()
        .expect("worker binary should run");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn launcher_rejects_zero_period_without_launching() {
    let out = Command::new(env!("CARGO_BIN_EXE_tickrun"))
        .args(["0", "5"])
        .output()
        .expect("launcher binary should run");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid argument"), "stderr was: {stderr}");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("job 1"), "no job should have launched");
}

#[test]
fn launcher_rejects_unparsable_arguments() {
    let out = Command::new(env!("CARGO_BIN_EXE_tickrun"))
        .args(["abc", "3"])
        .output()
        .expect("launcher binary should run");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn launcher_rejects_wrong_argument_count() {
    let out = Command::new(env!("CARGO_BIN_EXE_tickrun"))
        .arg("3")
        .output()
        .expect("launcher binary should run");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn dry_run_prints_config_and_launches_nothing() {
    let out = Command::new(env!("CARGO_BIN_EXE_tickrun"))
        .args(["1", "3", "--dry-run"])
        .output()
        .expect("launcher binary should run");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("tickrun dry-run"), "stdout was: {stdout}");
    assert!(stdout.contains("max_launches = 3"), "stdout was: {stdout}");
    assert!(!stdout.contains("job 1"), "no job should have launched");
}

#[test]
fn launcher_runs_the_configured_number_of_jobs() {
    let started = Instant::now();
    let out = Command::new(env!("CARGO_BIN_EXE_tickrun"))
        .args(["1", "2"])
        .output()
        .expect("launcher binary should run");

    assert!(out.status.success());
    // Timer-paced: one launch per second means at least two seconds total.
    assert!(started.elapsed() >= Duration::from_secs(2));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("job 1: pid = "), "stdout was: {stdout}");
    assert!(stdout.contains("job 2: pid = "), "stdout was: {stdout}");
    assert!(!stdout.contains("job 3"), "stdout was: {stdout}");
    assert!(
        stdout.contains("completed 2 of 2 jobs"),
        "stdout was: {stdout}"
    );
}
