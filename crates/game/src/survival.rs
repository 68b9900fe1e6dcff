//! Oxygen depletion cycle.
//!
//! Loop, per character, for its whole lifetime:
//! wait until submerged and alive, wait `interval` of game time, debit one
//! oxygen if still submerged, then yield one frame before waiting again.

use engine_core::FrameTime;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    AwaitSubmersion,
    Interval { remaining: f32 },
    Yield,
}

/// Driven once per visual frame with game time, so a pause freezes it.
#[derive(Debug, Clone, Copy)]
pub struct SurvivalTimer {
    interval: f32,
    phase: Phase,
}

impl SurvivalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            phase: Phase::AwaitSubmersion,
        }
    }

    /// True while counting down toward the next debit.
    #[cfg(test)]
    pub fn is_counting(&self) -> bool {
        matches!(self.phase, Phase::Interval { .. })
    }

    /// Advance one frame. Returns true when one unit of oxygen is due.
    pub fn tick(&mut self, frame: FrameTime, in_water: bool, died: bool) -> bool {
        if self.phase == Phase::Yield {
            self.phase = Phase::AwaitSubmersion;
        }

        if self.phase == Phase::AwaitSubmersion {
            if !(in_water && !died) {
                return false;
            }
            self.phase = Phase::Interval {
                remaining: self.interval,
            };
            // The wait starts counting from the next frame.
            return false;
        }

        if let Phase::Interval { remaining } = &mut self.phase {
            *remaining -= frame.scaled;
            if *remaining <= 0.0 {
                self.phase = Phase::Yield;
                return in_water;
            }
        }
        false
    }
}
