//! Simulated execution latency.
//!
//! The session pauses briefly before each command so output does not
//! appear instantly. The delay source is injected, so tests swap in
//! `NoDelay` and stay fast and deterministic.

use std::time::Duration;

use rand::Rng;

/// Source of per-command execution delays.
pub trait DelaySource {
    fn next_delay(&mut self) -> Duration;
}

/// Uniformly random delay between the configured bounds.
pub struct UniformDelay {
    min_ms: u64,
    max_ms: u64,
}

impl UniformDelay {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self { min_ms, max_ms }
    }
}

impl DelaySource for UniformDelay {
    fn next_delay(&mut self) -> Duration {
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }
}

/// Zero delay, for tests and batch use.
pub struct NoDelay;

impl DelaySource for NoDelay {
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}
