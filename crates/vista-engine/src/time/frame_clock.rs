use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in milliseconds, after clamping.
    pub elapsed_ms: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Elapsed time is clamped so a backgrounded window or a debugger pause does
/// not hand the physics handlers one enormous step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Default upper clamp on a single frame step.
    pub const DEFAULT_MAX: Duration = Duration::from_millis(250);

    /// Creates a new clock with default clamps (`0..=250ms`).
    pub fn new() -> Self {
        Self::with_clamps(Duration::ZERO, Self::DEFAULT_MAX)
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Call when resuming from suspension so the first frame is not a stall.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = self.clamp(now.saturating_duration_since(self.last));
        self.last = now;

        let ft = FrameTime {
            elapsed_ms: dt.as_secs_f32() * 1000.0,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    fn clamp(&self, dt: Duration) -> Duration {
        dt.clamp(self.dt_min, self.dt_max)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
