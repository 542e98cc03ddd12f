#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Frame timing from host-supplied animation frame timestamps.
///
/// `delta` comes from the timestamps; `started` is wall clock and only
/// used for diagnostics.
pub struct Timer {
    started: Instant,
    last_timestamp_ms: Option<f64>,
    /// Time since last tick
    pub delta: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            last_timestamp_ms: None,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances to `timestamp_ms`. Timestamps that go backwards, or a step
    /// that does not fit a `Duration`, count as a zero-length frame.
    pub fn tick(&mut self, timestamp_ms: f64) {
        if let Some(last) = self.last_timestamp_ms {
            let dt = ((timestamp_ms - last) / 1000.0).max(0.0);
            self.delta = Duration::try_from_secs_f64(dt).unwrap_or(Duration::ZERO);
        }
        self.last_timestamp_ms = Some(timestamp_ms);
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Wall-clock time since the timer was created.
    #[must_use]
    pub fn wall_elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
