//! Fixed-timestep pacing for the physics step.
//!
//! Rendering follows the window's redraw cadence; physics does not. The
//! clock accumulates real elapsed time and pays it out in fixed 60 Hz
//! steps, so simulation speed is independent of refresh rate. Accumulated
//! debt is capped: a window that was throttled for seconds resumes with at
//! most a handful of catch-up steps instead of a visible fast-forward.

use std::time::Instant;

/// Physics step size in seconds.
pub const STEP_DT: f32 = 1.0 / 60.0;

/// Most debt the clock will pay out after a stall, in seconds.
const MAX_ACCUMULATED: f32 = 0.25;

#[derive(Debug)]
pub struct StepClock {
    last: Option<Instant>,
    accumulator: f32,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            last: None,
            accumulator: 0.0,
        }
    }

    /// Number of fixed steps owed since the previous call.
    ///
    /// The first call after construction or [`reset`] owes nothing; it only
    /// anchors the clock.
    ///
    /// [`reset`]: StepClock::reset
    pub fn advance(&mut self) -> u32 {
        let now = Instant::now();
        let Some(last) = self.last.replace(now) else {
            return 0;
        };

        self.accumulator += now.duration_since(last).as_secs_f32();
        if self.accumulator > MAX_ACCUMULATED {
            self.accumulator = MAX_ACCUMULATED;
        }

        let mut steps = 0;
        while self.accumulator >= STEP_DT {
            self.accumulator -= STEP_DT;
            steps += 1;
        }
        steps
    }

    /// Forget any anchor and debt. The next `advance` owes zero steps.
    pub fn reset(&mut self) {
        self.last = None;
        self.accumulator = 0.0;
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new()
    }
}
