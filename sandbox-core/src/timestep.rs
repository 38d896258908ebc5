//! Fixed-step accumulation: turns variable frame deltas into whole simulation steps.

/// Default fixed simulation step, in seconds.
pub const FIXED_STEP: f32 = 8.0 / 1000.0;

/// Upper bound on steps yielded by a single `step` call. Under load the
/// simulation runs in slow motion rather than spiralling into catch-up work.
pub const MAX_STEPS_PER_CALL: u32 = 1;

/// Carries leftover frame time between calls and yields fixed-size steps.
#[derive(Debug, Clone)]
pub struct FixedStepAccumulator {
    step_size: f32,
    leftover: f32,
}

impl FixedStepAccumulator {
    pub fn new() -> Self {
        Self::with_step(FIXED_STEP)
    }

    /// `step_size` must be positive and finite; `SimulationConfig::validate`
    /// enforces this for configured steps.
    pub fn with_step(step_size: f32) -> Self {
        debug_assert!(
            step_size > 0.0 && step_size.is_finite(),
            "fixed step must be positive and finite, got {}",
            step_size
        );

        Self {
            step_size,
            leftover: 0.0,
        }
    }

    /// Add `dt` seconds of frame time and return how many fixed steps to run (0 or 1).
    pub fn step(&mut self, dt: f32) -> u32 {
        // Negative or NaN deltas contribute nothing.
        if dt > 0.0 {
            self.leftover += dt;
        }

        let whole = (self.leftover / self.step_size).floor();
        let num = if whole >= MAX_STEPS_PER_CALL as f32 {
            MAX_STEPS_PER_CALL
        } else if whole >= 1.0 {
            whole as u32
        } else {
            0
        };

        self.leftover -= num as f32 * self.step_size;
        num
    }

    /// The fixed step size. Independent of the frame delta.
    pub fn get_max_step(&self) -> f32 {
        self.step_size
    }

    /// Frame time not yet converted into steps.
    ///
    /// The backlog is unbounded: it grows whenever the caller feeds more than
    /// one step's worth of time per call. Past roughly 1.3e5 s an f32 ulp of
    /// the backlog exceeds the default step, and draining a step no longer
    /// changes it.
    pub fn leftover(&self) -> f32 {
        self.leftover
    }

    pub fn reset(&mut self) {
        self.leftover = 0.0;
    }
}

impl Default for FixedStepAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
