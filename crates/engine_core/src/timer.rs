//! Restartable timers driven by an external tick.
//!
//! These replace engine coroutines: each owner holds its own timer value and
//! ticks it from the game loop. Starting a timer that is already running
//! cancels the previous run first, so there is never more than one instance
//! per owner.

use crate::time::FrameTime;

/// Which clock a timer reads from a [`FrameTime`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Game time. Stops while the simulation is paused.
    #[default]
    Scaled,
    /// Wall-clock time. Keeps running through pauses.
    Unscaled,
}

impl Clock {
    pub fn pick(self, frame: FrameTime) -> f32 {
        match self {
            Clock::Scaled => frame.scaled,
            Clock::Unscaled => frame.unscaled,
        }
    }
}

/// One-shot countdown. Fires exactly once per `start`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delay {
    clock: Clock,
    remaining: Option<f32>,
}

impl Delay {
    pub fn new(clock: Clock) -> Self {
        Self { clock, remaining: None }
    }

    /// Start counting `seconds`. A run already in flight is cancelled.
    pub fn start(&mut self, seconds: f32) {
        self.cancel();
        self.remaining = Some(seconds.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Advance; returns true on the tick the delay elapses.
    pub fn tick(&mut self, frame: FrameTime) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        *remaining -= self.clock.pick(frame);
        if *remaining <= 0.0 {
            self.remaining = None;
            true
        } else {
            false
        }
    }
}

/// Linear interpolation of a scalar from a start value to a target over a
/// fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    clock: Clock,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(clock: Clock, from: f32, to: f32, duration: f32) -> Self {
        Self {
            clock,
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed / self.duration;
        self.from + (self.to - self.from) * t
    }

    /// Advance and return the new value. The final tick lands exactly on the target.
    pub fn tick(&mut self, frame: FrameTime) -> f32 {
        self.elapsed += self.clock.pick(frame);
        self.value()
    }
}
