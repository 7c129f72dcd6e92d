// src/exec/mod.rs

//! Worker process execution layer.
//!
//! - [`backend`] defines the `JobExecutor` trait the launcher loop talks
//!   to, so tests can substitute an executor that never spawns real
//!   processes.
//! - [`command`] owns the production executor loop, which spawns the
//!   worker binary with `tokio::process::Command` and reports back to the
//!   launcher via `LauncherEvent`s.

pub mod backend;
pub mod command;

pub use backend::{JobExecutor, WorkerExecutor};
pub use command::spawn_executor;
