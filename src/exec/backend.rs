// src/exec/backend.rs

//! Pluggable executor abstraction.
//!
//! The launcher loop talks to a `JobExecutor` instead of a raw mpsc
//! sender. This makes it easy to swap in a fake executor in tests while
//! keeping the production executor implementation in [`command`].

use std::future::Future;
use std::pin::Pin;

use anyhow::anyhow;
use tokio::sync::mpsc;

use crate::errors::Result;
use crate::launcher::runtime::{JobSpec, LauncherEvent};

use super::command::spawn_executor;

/// Trait abstracting how jobs are executed.
///
/// Production code uses [`WorkerExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait JobExecutor: Send {
    /// Dispatch one job for execution.
    ///
    /// The implementation is free to:
    /// - spawn a worker OS process (production)
    /// - simulate completion and emit `LauncherEvent`s directly (tests)
    fn launch(&mut self, spec: JobSpec) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real executor used in production.
///
/// Internally this wraps the executor loop in [`spawn_executor`]. The
/// launcher calls `launch`, which forwards the job to the background
/// loop via an mpsc channel.
pub struct WorkerExecutor {
    tx: mpsc::Sender<JobSpec>,
}

impl WorkerExecutor {
    /// Create a new worker executor, wiring it to the given launcher
    /// event sender.
    ///
    /// This spawns the background executor loop immediately.
    pub fn new(launcher_tx: mpsc::Sender<LauncherEvent>) -> Self {
        let tx = spawn_executor(launcher_tx);
        Self { tx }
    }
}

impl JobExecutor for WorkerExecutor {
    fn launch(&mut self, spec: JobSpec) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.tx.clone();

        Box::pin(async move {
            tx.send(spec)
                .await
                .map_err(|e| anyhow!("executor channel closed: {e}"))?;
            Ok(())
        })
    }
}
