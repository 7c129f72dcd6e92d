// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod launcher;
pub mod logging;
pub mod workload;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{LauncherConfig, configure};
use crate::exec::WorkerExecutor;
use crate::launcher::{Launcher, LauncherEvent, spawn_ticker};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config validation
/// - the periodic ticker
/// - the worker executor
/// - Ctrl-C handling
/// - the launcher event loop
pub async fn run(args: CliArgs) -> Result<()> {
    let config = configure(args.period_sec, args.max_launches)?;

    if args.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let (tx, rx) = mpsc::channel::<LauncherEvent>(16);

    let executor = WorkerExecutor::new(tx.clone());

    // Start the launcher's clock before the first period begins ticking,
    // so reported elapsed time covers every tick interval.
    let launcher = Launcher::new(config, rx, executor);
    let _ticker = spawn_ticker(config.period, tx.clone());

    // Ctrl-C → stop between jobs. The launcher ignores it while a job is
    // in flight and honors it at the next idle point.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(LauncherEvent::ShutdownRequested).await;
        });
    }

    let summary = launcher.run().await?;

    info!(
        launches = summary.launches_completed,
        elapsed_sec = summary.elapsed.as_secs_f64(),
        "run finished"
    );
    Ok(())
}

/// Simple dry-run output: print the resolved config, launch nothing.
fn print_dry_run(config: &LauncherConfig) {
    println!("tickrun dry-run");
    println!("  period = {} sec", config.period.as_secs());
    println!("  max_launches = {}", config.max_launches);
    println!("  workload iterations = {}", workload::DEFAULT_ITERATIONS);
}
