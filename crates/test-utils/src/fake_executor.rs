use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tokio::sync::mpsc;

use tickrun::errors::Result;
use tickrun::exec::JobExecutor;
use tickrun::launcher::{JobOutcome, JobSpec, LauncherEvent};

/// A fake executor that records which jobs were "launched".
///
/// In auto-complete mode it immediately reports each job as started and
/// finished successfully. In manual mode it records the launch only, and
/// the test drives `JobStarted` / `JobFinished` events itself (useful for
/// exercising the in-flight window).
///
/// Auto-complete mode pushes two events into the launcher channel per
/// launch without the loop draining in between, so tests should create
/// the channel with some slack (the teacher-sized 64 is plenty).
pub struct FakeJobExecutor {
    launcher_tx: mpsc::Sender<LauncherEvent>,
    launched: Arc<Mutex<Vec<u32>>>,
    auto_complete: bool,
}

impl FakeJobExecutor {
    /// Fake that completes every job instantly.
    pub fn new(launcher_tx: mpsc::Sender<LauncherEvent>, launched: Arc<Mutex<Vec<u32>>>) -> Self {
        Self {
            launcher_tx,
            launched,
            auto_complete: true,
        }
    }

    /// Fake that only records launches; completion events come from the test.
    pub fn manual(
        launcher_tx: mpsc::Sender<LauncherEvent>,
        launched: Arc<Mutex<Vec<u32>>>,
    ) -> Self {
        Self {
            launcher_tx,
            launched,
            auto_complete: false,
        }
    }
}

impl JobExecutor for FakeJobExecutor {
    fn launch(&mut self, spec: JobSpec) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.launcher_tx.clone();
        let launched = Arc::clone(&self.launched);
        let auto_complete = self.auto_complete;

        Box::pin(async move {
            {
                let mut guard = launched.lock().unwrap();
                guard.push(spec.seq);
            }

            if auto_complete {
                tx.send(LauncherEvent::JobStarted {
                    seq: spec.seq,
                    pid: 4242,
                })
                .await
                .map_err(|e| anyhow!("launcher channel closed: {e}"))?;

                tx.send(LauncherEvent::JobFinished {
                    seq: spec.seq,
                    outcome: JobOutcome::Success,
                    cpu_time: None,
                })
                .await
                .map_err(|e| anyhow!("launcher channel closed: {e}"))?;
            }

            Ok(())
        })
    }
}
