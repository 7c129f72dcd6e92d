// src/config.rs

//! Launch configuration, validated once at startup.

use std::time::Duration;

use thiserror::Error;

/// Validation failures for launcher arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Immutable launcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Time between job launches.
    pub period: Duration,

    /// Total number of jobs to launch before exiting.
    pub max_launches: u32,
}

/// Validate raw CLI values and build a [`LauncherConfig`].
///
/// Both values must be positive. Unparsable input never reaches this
/// function; the CLI layer rejects it with exit code 1.
pub fn configure(period_sec: u32, max_launches: u32) -> Result<LauncherConfig, ConfigError> {
    if period_sec == 0 {
        return Err(ConfigError::InvalidArgument(
            "PERIOD_SECONDS must be positive".to_string(),
        ));
    }
    if max_launches == 0 {
        return Err(ConfigError::InvalidArgument(
            "MAX_LAUNCHES must be positive".to_string(),
        ));
    }

    Ok(LauncherConfig {
        period: Duration::from_secs(u64::from(period_sec)),
        max_launches,
    })
}
