// src/exec/command.rs

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::launcher::runtime::{JobOutcome, JobSpec, LauncherEvent};

/// Name of the worker binary, expected next to the launcher executable.
const WORKER_BIN: &str = "tickrun-worker";

/// Spawn the background executor loop.
///
/// The returned `mpsc::Sender<JobSpec>` is what the launcher uses through
/// [`super::WorkerExecutor`]. Jobs are executed one at a time, in the
/// order received; the launcher never dispatches a new job before the
/// previous one completed, and the loop itself runs them inline.
pub fn spawn_executor(launcher_tx: mpsc::Sender<LauncherEvent>) -> mpsc::Sender<JobSpec> {
    let (tx, mut rx) = mpsc::channel::<JobSpec>(8);

    tokio::spawn(async move {
        debug!("executor loop started");
        while let Some(spec) = rx.recv().await {
            run_job(spec, &launcher_tx).await;
        }
        debug!("executor loop finished (channel closed)");
    });

    tx
}

/// Run a single worker process and emit `JobStarted` / `JobFinished`.
///
/// Spawn errors are reported as `SpawnFailed`, which the launcher treats
/// as fatal.
async fn run_job(spec: JobSpec, launcher_tx: &mpsc::Sender<LauncherEvent>) {
    if let Err(err) = run_job_inner(spec, launcher_tx).await {
        error!(seq = spec.seq, error = %err, "worker execution error");
        let _ = launcher_tx
            .send(LauncherEvent::SpawnFailed {
                seq: spec.seq,
                error: format!("{err:#}"),
            })
            .await;
    }
}

async fn run_job_inner(spec: JobSpec, launcher_tx: &mpsc::Sender<LauncherEvent>) -> Result<()> {
    let bin = worker_binary()?;
    info!(seq = spec.seq, bin = %bin.display(), "starting worker process");

    let mut child = Command::new(&bin)
        .arg(spec.seq.to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning worker for job {}", spec.seq))?;

    if let Some(pid) = child.id() {
        launcher_tx
            .send(LauncherEvent::JobStarted { seq: spec.seq, pid })
            .await
            .context("sending JobStarted event to launcher")?;
    }

    // Always consume stderr so buffers don't fill; log at debug.
    if let Some(stderr) = child.stderr.take() {
        let seq = spec.seq;
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(seq, "worker stderr: {}", line);
            }
        });
    }

    // Forward worker stdout to the console and pick out the workload time
    // the worker reports. Stdout closes when the worker exits, so this
    // also drains before the wait below.
    let mut cpu_time = None;
    if let Some(stdout) = child.stdout.take() {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            println!("{line}");
            if cpu_time.is_none() {
                cpu_time = parse_workload_time(&line);
            }
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for worker of job {}", spec.seq))?;

    let outcome = if status.success() {
        JobOutcome::Success
    } else {
        JobOutcome::Failed(status.code().unwrap_or(-1))
    };

    launcher_tx
        .send(LauncherEvent::JobFinished {
            seq: spec.seq,
            outcome,
            cpu_time,
        })
        .await
        .with_context(|| format!("sending JobFinished event for job {}", spec.seq))?;

    Ok(())
}

/// Locate the worker binary next to the current executable.
fn worker_binary() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("resolving current executable path")?;
    let dir = exe
        .parent()
        .context("current executable has no parent directory")?;

    let name = if cfg!(windows) {
        format!("{WORKER_BIN}.exe")
    } else {
        WORKER_BIN.to_string()
    };
    Ok(dir.join(name))
}

fn workload_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"workload time = ([0-9]+(?:\.[0-9]+)?) sec").expect("pattern is a literal")
    })
}

/// Extract the workload time from a worker stdout line, if it carries one.
fn parse_workload_time(line: &str) -> Option<Duration> {
    let caps = workload_time_regex().captures(line)?;
    let secs: f64 = caps.get(1)?.as_str().parse().ok()?;
    Some(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_workload_time_from_worker_line() {
        let line = "job 3: workload time = 0.412 sec";
        assert_eq!(
            parse_workload_time(line),
            Some(Duration::from_secs_f64(0.412))
        );
    }

    #[test]
    fn ignores_unrelated_lines() {
        assert_eq!(parse_workload_time("job 3: pid = 1234, started at ..."), None);
        assert_eq!(parse_workload_time(""), None);
    }
}
