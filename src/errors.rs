// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    /// Process creation failed. Fatal: the launcher aborts, no retry.
    #[error("failed to spawn worker: {0}")]
    Spawn(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LaunchError>;
