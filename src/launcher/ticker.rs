// src/launcher/ticker.rs

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use super::runtime::LauncherEvent;

/// Spawn the periodic tick source.
///
/// The first tick fires after one full period, not immediately, matching
/// an interval timer armed with equal initial and repeat values. Ticks
/// that fall due while the launcher is busy are skipped rather than
/// bursted. The task stops once the launcher drops its receiver.
pub fn spawn_ticker(period: Duration, tx: mpsc::Sender<LauncherEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticks.tick().await;
            if tx.send(LauncherEvent::Tick).await.is_err() {
                debug!("launcher channel closed; ticker stopping");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_fires_after_one_full_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let _ticker = spawn_ticker(Duration::from_secs(3), tx);
        // Let the ticker task register its interval before moving the clock.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(matches!(rx.recv().await, Some(LauncherEvent::Tick)));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_repeat_at_the_configured_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let _ticker = spawn_ticker(Duration::from_secs(1), tx);
        tokio::task::yield_now().await;

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(1)).await;
            assert!(matches!(rx.recv().await, Some(LauncherEvent::Tick)));
        }
    }
}
