use std::time::{Duration, Instant};

/// Timing snapshot for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Seconds since the clock started. Unclamped.
    pub elapsed: f32,
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Produces [`FrameTime`] snapshots.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// produce a huge step in animations.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(Duration::from_millis(250))
    }

    pub fn with_max_dt(dt_max: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_max,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        self.tick_at(now)
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped_but_elapsed_is_not() {
        let mut clock = FrameClock::with_max_dt(Duration::from_millis(100));
        let start = clock.start;

        let first = clock.tick_at(start + Duration::from_millis(20));
        assert!((first.dt - 0.02).abs() < 1e-6);
        assert_eq!(first.frame_index, 0);

        let second = clock.tick_at(start + Duration::from_secs(2));
        assert!((second.dt - 0.1).abs() < 1e-6);
        assert!((second.elapsed - 2.0).abs() < 1e-6);
        assert_eq!(second.frame_index, 1);
    }
}
