// src/workload.rs

//! Synthetic CPU-bound workload run by the worker binary.

use std::hint::black_box;
use std::time::{Duration, Instant};

/// Loop rounds each worker burns. A stand-in for real work.
pub const DEFAULT_ITERATIONS: u64 = 100_000_000;

/// Spin for `iterations` loop rounds and report how long it took.
///
/// `black_box` keeps the accumulator live so the loop is not optimized
/// away in release builds.
pub fn busy_work(iterations: u64) -> Duration {
    let start = Instant::now();

    let mut acc: u64 = 0;
    for i in 0..iterations {
        acc = black_box(acc.wrapping_add(i));
    }
    black_box(acc);

    start.elapsed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_iterations_finish_immediately() {
        assert!(busy_work(0) < Duration::from_millis(50));
    }

    #[test]
    fn small_workload_takes_measurable_but_bounded_time() {
        // Generous bound; this is about not hanging, not about speed.
        assert!(busy_work(10_000) < Duration::from_secs(5));
    }
}
