// Frame scheduling.
//
// `std::time::Instant::now()` can panic on `wasm32-unknown-unknown` depending on
// how the runtime is configured. `web-time` provides a browser-backed monotonic
// clock via `performance.now()`.

pub use core::time::Duration;

#[cfg(target_arch = "wasm32")]
pub use web_time::{Instant, SystemTime, UNIX_EPOCH};

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Longest step a single frame may take. A backgrounded tab or a paused
/// debugger must not turn into one giant jump of the animation clock.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(250);

/// Supplies the elapsed time for each [`Network::tick`](crate::network::Network::tick).
pub trait FrameScheduler {
    fn next_dt(&mut self) -> Duration;
}

/// Constant step; used by tests and the headless runner.
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    dt: Duration,
}

impl FixedStep {
    pub fn new(dt: Duration) -> Self {
        Self { dt }
    }

    pub fn from_fps(fps: u32) -> Self {
        let fps = fps.clamp(1, 1000);
        Self::new(Duration::from_secs_f64(1.0 / fps as f64))
    }
}

impl FrameScheduler for FixedStep {
    fn next_dt(&mut self) -> Duration {
        self.dt
    }
}

/// Measures real time between calls, capped at [`MAX_FRAME_DT`].
#[derive(Debug, Clone)]
pub struct WallClock {
    last: Option<Instant>,
}

impl WallClock {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for WallClock {
    fn next_dt(&mut self) -> Duration {
        let now = Instant::now();
        let dt = match self.last {
            Some(prev) => now.duration_since(prev).min(MAX_FRAME_DT),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        dt
    }
}
