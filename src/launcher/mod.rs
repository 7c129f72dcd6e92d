// src/launcher/mod.rs

//! Launch pacing engine for tickrun.
//!
//! This module ties together:
//! - the periodic ticker task that paces launches
//! - the event loop that launches one job per tick, collects it, and
//!   stops after the configured number of launches
//! - interrupt handling (honored between jobs, ignored mid-job)

pub mod runtime;
pub mod ticker;

pub use runtime::{JobOutcome, JobSpec, Launcher, LauncherEvent, LauncherState, RunSummary};
pub use ticker::spawn_ticker;
