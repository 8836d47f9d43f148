//! Process uptime tracking.

use std::time::{Duration, Instant};

/// Monotonic clock anchored at process start.
#[derive(Debug, Clone, Copy)]
pub struct ProcessClock {
    started: Instant,
}

impl ProcessClock {
    /// Anchor the clock at the current instant. Call once, as early as possible in `main`.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn uptime_secs(&self) -> f64 {
        self.uptime().as_secs_f64()
    }
}
