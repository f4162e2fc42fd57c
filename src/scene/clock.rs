use std::time::Duration;

/// Simulation rate. Every per-tick constant in the scene is tuned for it.
pub const TICKS_PER_SECOND: f32 = 60.0;
const MAX_STEPS_PER_ADVANCE: u32 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    frame: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.frame = self.frame.saturating_add(1);
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn seconds(&self) -> f32 {
        self.frame as f32 / TICKS_PER_SECOND
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / TICKS_PER_SECOND)
    }
}

impl FixedTimestep {
    #[must_use]
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    pub fn accumulate(&mut self, dt: Duration) -> u32 {
        let cap = self.step * MAX_STEPS_PER_ADVANCE as f32;
        self.accumulator = (self.accumulator + dt.as_secs_f32()).min(cap);
        let steps = (self.accumulator / self.step + 1e-4).floor() as u32;
        self.accumulator = (self.accumulator - steps as f32 * self.step).max(0.0);
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_reports_seconds_at_sixty_ticks() {
        let mut clock = FrameClock::new();
        for _ in 0..90 {
            clock.advance();
        }
        assert_eq!(clock.frame(), 90);
        assert!((clock.seconds() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn one_step_for_one_tick_of_time() {
        let mut timestep = FixedTimestep::default();
        assert_eq!(timestep.accumulate(Duration::from_secs_f32(1.0 / 60.0)), 1);
    }

    #[test]
    fn partial_ticks_accumulate() {
        let mut timestep = FixedTimestep::default();
        assert_eq!(timestep.accumulate(Duration::from_millis(8)), 0);
        assert_eq!(timestep.accumulate(Duration::from_millis(10)), 1);
    }

    #[test]
    fn thirty_fps_runs_two_ticks_per_frame() {
        let mut timestep = FixedTimestep::default();
        let total: u32 = (0..30)
            .map(|_| timestep.accumulate(Duration::from_secs_f32(1.0 / 30.0)))
            .sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut timestep = FixedTimestep::default();
        assert_eq!(timestep.accumulate(Duration::from_secs(3)), 4);
        assert_eq!(timestep.accumulate(Duration::ZERO), 0);
    }
}
