//! Time management for the game loop.

use std::time::{Duration, Instant};

/// Process-wide simulation state. Every tick-driven subsystem consults this
/// instead of a hidden global time scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimulationState {
    #[default]
    Running,
    Paused,
}

/// Deltas handed to per-frame timers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Game-time delta; zero while the simulation is paused.
    pub scaled: f32,
    /// Wall-clock delta; keeps advancing while paused.
    pub unscaled: f32,
}

impl FrameTime {
    /// A frame where both clocks advanced by `dt` (simulation running).
    pub fn running(dt: f32) -> Self {
        Self { scaled: dt, unscaled: dt }
    }

    /// A frame where only wall-clock time advanced (simulation paused).
    pub fn paused(dt: f32) -> Self {
        Self { scaled: 0.0, unscaled: dt }
    }
}

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame (wall clock).
    delta: Duration,
    /// Total wall-clock time since start.
    elapsed: Duration,
    /// Total game time since start; does not advance while paused.
    game_elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep for physics (default 50 Hz).
    fixed_timestep: Duration,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
    state: SimulationState,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            game_elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 50.0),
            accumulator: Duration::ZERO,
            state: SimulationState::Running,
        }
    }

    /// Update timing at the start of a new frame from the wall clock.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Advance by an explicit delta. Used by headless runs and tests.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        if self.state == SimulationState::Running {
            self.game_elapsed += delta;
            self.accumulator += delta;
        }
    }

    /// Get the game-time delta in seconds (zero while paused).
    pub fn delta_seconds(&self) -> f32 {
        match self.state {
            SimulationState::Running => self.delta.as_secs_f32(),
            SimulationState::Paused => 0.0,
        }
    }

    /// Get the wall-clock delta in seconds.
    pub fn unscaled_delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Both deltas for this frame.
    pub fn frame(&self) -> FrameTime {
        FrameTime {
            scaled: self.delta_seconds(),
            unscaled: self.unscaled_delta_seconds(),
        }
    }

    /// Get total wall-clock time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total game time in seconds.
    pub fn game_elapsed_seconds(&self) -> f32 {
        self.game_elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Check if a fixed update should run and consume the time.
    /// Never true while paused.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.state == SimulationState::Running && self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Set the fixed timestep rate in Hz.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == SimulationState::Paused
    }

    /// Freeze physics and every scaled timer.
    pub fn pause(&mut self) {
        if self.state != SimulationState::Paused {
            log::debug!("Simulation paused at {:.2}s", self.elapsed_seconds());
        }
        self.state = SimulationState::Paused;
    }

    /// Resume after a pause. Time spent paused is not owed to the fixed step.
    pub fn resume(&mut self) {
        if self.state != SimulationState::Running {
            log::debug!("Simulation resumed at {:.2}s", self.elapsed_seconds());
        }
        self.state = SimulationState::Running;
    }
}
