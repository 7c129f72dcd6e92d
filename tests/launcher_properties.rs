// tests/launcher_properties.rs

//! Property tests for argument validation and launch counting.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use proptest::prelude::*;
use tokio::sync::mpsc;

use tickrun::config::{ConfigError, LauncherConfig, configure};
use tickrun::launcher::{JobOutcome, Launcher, LauncherEvent};
use tickrun_test_utils::fake_executor::FakeJobExecutor;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn configure_accepts_all_positive_pairs(
        period_sec in 1u32..=86_400,
        max_launches in 1u32..=100_000,
    ) {
        let cfg = configure(period_sec, max_launches).unwrap();
        prop_assert_eq!(cfg.period, Duration::from_secs(u64::from(period_sec)));
        prop_assert_eq!(cfg.max_launches, max_launches);
    }

    #[test]
    fn configure_rejects_any_zero(period_sec in 0u32..=10, max_launches in 0u32..=10) {
        prop_assume!(period_sec == 0 || max_launches == 0);
        prop_assert!(matches!(
            configure(period_sec, max_launches),
            Err(ConfigError::InvalidArgument(_))
        ));
    }

    #[test]
    fn run_performs_exactly_max_launches(max_launches in 1u32..20, extra_ticks in 0u32..5) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        let (summary, launched) = rt.block_on(async move {
            let (tx, rx) = mpsc::channel(256);
            let launched = Arc::new(Mutex::new(Vec::new()));
            let executor = FakeJobExecutor::manual(tx.clone(), Arc::clone(&launched));

            for seq in 1..=max_launches {
                tx.send(LauncherEvent::Tick).await.unwrap();
                tx.send(LauncherEvent::JobFinished {
                    seq,
                    outcome: JobOutcome::Success,
                    cpu_time: None,
                })
                .await
                .unwrap();
            }
            // Ticks past the limit must not cause further launches.
            for _ in 0..extra_ticks {
                tx.send(LauncherEvent::Tick).await.unwrap();
            }

            let cfg = LauncherConfig {
                period: Duration::from_secs(1),
                max_launches,
            };
            let summary = Launcher::new(cfg, rx, executor).run().await.unwrap();
            let launched = launched.lock().unwrap().clone();
            (summary, launched)
        });

        prop_assert_eq!(summary.launches_completed, max_launches);
        let expected: Vec<u32> = (1..=max_launches).collect();
        prop_assert_eq!(launched, expected);
    }
}
