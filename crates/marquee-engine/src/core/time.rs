/// Most fixed steps one frame may consume before the backlog is discarded.
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Fixed timestep accumulator.
/// Effects and entities always advance by the same `dt`, whatever the
/// display's frame rate, so animations replay identically.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
    ticks: u64,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
            ticks: 0,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // A long stall (tab in the background) must not replay seconds of ticks.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.ticks += steps as u64;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Fixed steps run since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Forget leftover time, e.g. after a scene switch.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.ticks = 0;
    }
}
