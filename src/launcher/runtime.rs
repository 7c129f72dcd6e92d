// src/launcher/runtime.rs

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::LauncherConfig;
use crate::errors::{LaunchError, Result};
use crate::exec::JobExecutor;

/// Job handed to the executor: one worker launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSpec {
    /// 1-based sequence number of this launch.
    pub seq: u32,
}

/// Result of a finished worker process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Success,
    Failed(i32), // exit code
}

/// Events sent into the launcher loop from the ticker, the executor, and
/// the Ctrl-C task.
///
/// The idea is that:
/// - the ticker sends `Tick`
/// - the executor sends `JobStarted`, then `JobFinished` or `SpawnFailed`
/// - Ctrl-C handling sends `ShutdownRequested`
#[derive(Debug, Clone)]
pub enum LauncherEvent {
    Tick,
    JobStarted {
        seq: u32,
        pid: u32,
    },
    JobFinished {
        seq: u32,
        outcome: JobOutcome,
        /// Workload time the worker reported on its stdout, when present.
        cpu_time: Option<Duration>,
    },
    SpawnFailed {
        seq: u32,
        error: String,
    },
    ShutdownRequested,
}

/// Mutable run state, owned exclusively by the launcher loop.
///
/// Invariant: `launches_completed <= max_launches`; the loop terminates
/// exactly when equality is reached.
#[derive(Debug)]
pub struct LauncherState {
    pub launches_completed: u32,
    pub start_time: Instant,
}

/// The job currently in flight; dropped once its completion is processed.
#[derive(Debug, Clone, Copy)]
struct JobRecord {
    sequence_number: u32,
    process_id: Option<u32>,
    started: Instant,
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub launches_completed: u32,
    pub elapsed: Duration,
}

/// The launch pacing loop.
///
/// Responsibilities:
/// - Consume `LauncherEvent`s from the ticker, executor, and Ctrl-C task.
/// - Launch at most one job per tick, never overlapping launches.
/// - Count completions and stop after `max_launches` jobs.
///
/// Policy per tick: check the completed count against the limit, launch,
/// collect the completion, then increment. Job N's completion is fully
/// processed before job N+1 can launch, because launches are gated on
/// `in_flight` and all events flow through this single loop.
pub struct Launcher<E: JobExecutor> {
    config: LauncherConfig,
    state: LauncherState,
    in_flight: Option<JobRecord>,
    events_rx: mpsc::Receiver<LauncherEvent>,
    executor: E,
}

impl<E: JobExecutor> Launcher<E> {
    pub fn new(config: LauncherConfig, events_rx: mpsc::Receiver<LauncherEvent>, executor: E) -> Self {
        Self {
            config,
            state: LauncherState {
                launches_completed: 0,
                start_time: Instant::now(),
            },
            in_flight: None,
            events_rx,
            executor,
        }
    }

    /// Main event loop.
    ///
    /// Blocks until `max_launches` jobs have completed (or an interrupt
    /// arrives between jobs), prints the run summary, and returns it.
    /// A spawn failure aborts the whole run with `LaunchError::Spawn`.
    pub async fn run(mut self) -> Result<RunSummary> {
        info!(
            period_sec = self.config.period.as_secs(),
            max_launches = self.config.max_launches,
            "launcher started"
        );

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "launcher received event");

            let keep_running = match event {
                LauncherEvent::Tick => self.handle_tick().await?,
                LauncherEvent::JobStarted { seq, pid } => self.handle_job_started(seq, pid),
                LauncherEvent::JobFinished {
                    seq,
                    outcome,
                    cpu_time,
                } => self.handle_job_finished(seq, outcome, cpu_time),
                LauncherEvent::SpawnFailed { seq, error } => {
                    return Err(LaunchError::Spawn(format!("job {seq}: {error}")));
                }
                LauncherEvent::ShutdownRequested => self.handle_shutdown(),
            };

            if !keep_running {
                break;
            }
        }

        let summary = self.summary();
        println!(
            "completed {} of {} jobs, total real time {:.3} sec",
            summary.launches_completed,
            self.config.max_launches,
            summary.elapsed.as_secs_f64()
        );
        info!("launcher exiting");
        Ok(summary)
    }

    /// Handle a timer tick: launch the next job unless one is in flight.
    ///
    /// The period is assumed to be longer than one job's duration. That is
    /// not guaranteed by construction, so a tick that arrives while a job
    /// is still running skips its launch instead of overlapping.
    async fn handle_tick(&mut self) -> Result<bool> {
        if self.in_flight.is_some() {
            warn!("tick while a job is still in flight; skipping this launch");
            return Ok(true);
        }

        if self.state.launches_completed >= self.config.max_launches {
            // A final tick can race the last completion through the
            // channel; there is nothing left to launch.
            return Ok(false);
        }

        let seq = self.state.launches_completed + 1;
        info!(seq, "launching job");

        self.in_flight = Some(JobRecord {
            sequence_number: seq,
            process_id: None,
            started: Instant::now(),
        });
        self.executor.launch(JobSpec { seq }).await?;

        Ok(true)
    }

    fn handle_job_started(&mut self, seq: u32, pid: u32) -> bool {
        info!(seq, pid, "job started");
        if let Some(record) = self.in_flight.as_mut() {
            record.process_id = Some(pid);
        }
        true
    }

    /// Collect a finished job, then increment the completed count.
    fn handle_job_finished(
        &mut self,
        seq: u32,
        outcome: JobOutcome,
        cpu_time: Option<Duration>,
    ) -> bool {
        let record = self.in_flight.take();
        if record.map(|r| r.sequence_number) != Some(seq) {
            warn!(seq, "completion for a job that was not in flight");
        }

        match outcome {
            JobOutcome::Success => info!(seq, "job completed"),
            // A failed job still counts as a completed launch.
            JobOutcome::Failed(code) => warn!(seq, exit_code = code, "job exited with failure"),
        }

        if let Some(cpu) = cpu_time {
            info!(seq, cpu_sec = cpu.as_secs_f64(), "job workload time");
        }
        if let Some(record) = record {
            debug!(
                seq,
                pid = record.process_id,
                wall_sec = record.started.elapsed().as_secs_f64(),
                "job wall time"
            );
        }

        self.state.launches_completed += 1;
        self.state.launches_completed < self.config.max_launches
    }

    /// Interrupts are honored between jobs, ignored while one is running.
    fn handle_shutdown(&mut self) -> bool {
        if self.in_flight.is_some() {
            info!("interrupt received while a job is in flight; ignoring");
            true
        } else {
            info!("interrupt received between jobs; stopping");
            false
        }
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            launches_completed: self.state.launches_completed,
            elapsed: self.state.start_time.elapsed(),
        }
    }
}
