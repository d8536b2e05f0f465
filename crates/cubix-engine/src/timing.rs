//! Fixed timestep accumulator for the simulation loop.

use std::time::{Duration, Instant};

/// Most fixed updates run for one frame before the backlog is dropped.
const MAX_UPDATES_PER_FRAME: u32 = 10;

/// Largest frame delta accepted, in seconds.
const MAX_FRAME_DT: f32 = 0.25;

/// Turns wall-clock frame deltas into a whole number of fixed ticks.
#[derive(Debug)]
pub struct FixedStep {
    /// Fixed tick length in seconds
    fixed_dt: f32,
    /// Unspent time
    accumulator: f32,
    /// Start of the current frame
    last_frame: Instant,
}

impl FixedStep {
    /// Creates an accumulator running at `tick_rate` ticks per second.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        Self {
            fixed_dt: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
            last_frame: Instant::now(),
        }
    }

    /// Fixed tick length in seconds.
    #[must_use]
    pub const fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Seconds since the previous call, clamped to [`MAX_FRAME_DT`].
    pub fn delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt.min(MAX_FRAME_DT)
    }

    /// Adds `dt` seconds and returns how many fixed ticks are due.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut count = 0;
        while self.accumulator >= self.fixed_dt && count < MAX_UPDATES_PER_FRAME {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }

        // Still behind after the cap: drop the backlog.
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }
        count
    }

    /// Sleeps until one fixed tick has passed since the frame started.
    pub fn sleep_remainder(&self) {
        let budget = Duration::from_secs_f32(self.fixed_dt);
        let elapsed = self.last_frame.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_whole_ticks() {
        let mut step = FixedStep::new(20);
        assert_eq!(step.accumulate(0.03), 0);
        assert_eq!(step.accumulate(0.03), 1);
        assert_eq!(step.accumulate(0.1), 2);
    }

    #[test]
    fn test_accumulate_caps_backlog() {
        let mut step = FixedStep::new(60);
        assert_eq!(step.accumulate(10.0), MAX_UPDATES_PER_FRAME);
        // Backlog was dropped rather than carried into the next frame.
        assert_eq!(step.accumulate(0.0), 0);
    }

    #[test]
    fn test_delta_time_is_clamped() {
        let mut step = FixedStep::new(60);
        let dt = step.delta_time();
        assert!(dt >= 0.0);
        assert!(dt <= MAX_FRAME_DT);
    }

    #[test]
    fn test_zero_rate_does_not_divide_by_zero() {
        let step = FixedStep::new(0);
        assert!((step.fixed_dt() - 1.0).abs() < f32::EPSILON);
    }
}
