//! Input-to-velocity conversion for the player body.

use glam::Vec2;
use input::InputSample;

use crate::animation::{self, AnimationSink};
use crate::character::{CharacterBody, CharacterState, PlatformHandle};

/// Holding down past this (and pressing jump) on a bridge starts a drop-through.
const DROP_THROUGH_AXIS: f32 = -0.5;

/// Result of one physics tick of movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Velocity committed to the body.
    Moved(Vec2),
    /// Normal movement was skipped; the caller should start dropping through this platform.
    DropThrough(PlatformHandle),
}

#[derive(Debug, Clone, Copy)]
pub struct MovementController {
    pub speed: f32,
    pub jump_speed: f32,
    /// Multiplier applied to the whole velocity every tick in water, in (0, 1).
    pub water_damping: f32,
}

impl MovementController {
    pub fn new(speed: f32, jump_speed: f32, water_damping: f32) -> Self {
        Self {
            speed,
            jump_speed,
            water_damping,
        }
    }

    /// Latch a jump press. Only allowed while grounded, dry, and not already
    /// latched, so presses in the air or underwater are never buffered.
    pub fn latch_jump(state: &mut CharacterState, jump_pressed: bool) -> bool {
        if !state.jump_requested && state.grounded && !state.in_water {
            state.jump_requested = jump_pressed;
            if jump_pressed {
                log::debug!("Jump latched");
            }
        }
        state.jump_requested
    }

    /// One physics tick. The caller skips this entirely while the character is dead.
    pub fn step(
        &self,
        input: InputSample,
        state: &mut CharacterState,
        body: &mut impl CharacterBody,
        anim: &mut impl AnimationSink,
    ) -> MoveOutcome {
        if let Some(platform) = state.platform {
            if input.vertical < DROP_THROUGH_AXIS && state.jump_requested {
                state.jump_requested = false;
                state.grounded = false;
                return MoveOutcome::DropThrough(platform);
            }
        }

        let mut velocity = body.velocity();
        velocity.x = input.horizontal * self.speed;

        if state.jump_requested {
            state.jump_requested = false;
            velocity.y = self.jump_speed;
        }

        if state.in_water {
            // Without vertical input, gravity keeps acting.
            if input.vertical.abs() > f32::EPSILON {
                velocity.y = input.vertical * self.speed;
            }
            velocity *= self.water_damping;
        }

        body.set_velocity(velocity);

        anim.set_float(animation::HORIZONTAL_VELOCITY, velocity.x.abs());
        anim.set_float(animation::VERTICAL_VELOCITY, velocity.y);

        MoveOutcome::Moved(velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimatorParams;
    use crate::character::testing::{platform, FakeBody};

    fn controller() -> MovementController {
        MovementController::new(5.0, 8.0, 0.5)
    }

    fn grounded_state() -> CharacterState {
        CharacterState {
            grounded: true,
            ..Default::default()
        }
    }

    #[test]
    fn horizontal_input_sets_x_and_keeps_y() {
        let mut body = FakeBody {
            velocity: Vec2::new(0.0, -3.0),
            ..Default::default()
        };
        let mut state = grounded_state();
        let mut anim = AnimatorParams::new();

        let outcome = controller().step(InputSample::new(-1.0, 0.0, false), &mut state, &mut body, &mut anim);

        assert_eq!(outcome, MoveOutcome::Moved(Vec2::new(-5.0, -3.0)));
        assert_eq!(body.velocity, Vec2::new(-5.0, -3.0));
        assert_eq!(anim.get_float(animation::HORIZONTAL_VELOCITY), 5.0);
        assert_eq!(anim.get_float(animation::VERTICAL_VELOCITY), -3.0);
    }

    #[test]
    fn latched_jump_sets_jump_speed_and_clears_request() {
        let mut body = FakeBody::default();
        let mut state = grounded_state();
        let mut anim = AnimatorParams::new();

        assert!(MovementController::latch_jump(&mut state, true));
        controller().step(InputSample::default(), &mut state, &mut body, &mut anim);

        assert_eq!(body.velocity.y, 8.0);
        assert!(!state.jump_requested);
    }

    #[test]
    fn jump_never_latches_in_air_or_water() {
        let mut airborne = CharacterState::default();
        assert!(!MovementController::latch_jump(&mut airborne, true));

        let mut swimming = CharacterState {
            grounded: true,
            in_water: true,
            ..Default::default()
        };
        assert!(!MovementController::latch_jump(&mut swimming, true));
    }

    #[test]
    fn latched_jump_survives_frames_without_a_press() {
        let mut state = grounded_state();
        MovementController::latch_jump(&mut state, true);
        assert!(MovementController::latch_jump(&mut state, false));
    }

    #[test]
    fn water_overrides_vertical_and_damps() {
        let mut body = FakeBody {
            velocity: Vec2::new(0.0, -4.0),
            ..Default::default()
        };
        let mut state = CharacterState {
            in_water: true,
            ..Default::default()
        };
        let mut anim = AnimatorParams::new();

        controller().step(InputSample::new(1.0, 1.0, false), &mut state, &mut body, &mut anim);
        assert_eq!(body.velocity, Vec2::new(2.5, 2.5));

        // No vertical input: gravity's velocity is kept, only damped.
        body.velocity = Vec2::new(0.0, -4.0);
        controller().step(InputSample::new(0.0, 0.0, false), &mut state, &mut body, &mut anim);
        assert_eq!(body.velocity, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn down_and_jump_on_bridge_requests_drop_without_moving() {
        let bridge = platform(7);
        let mut body = FakeBody {
            velocity: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        let mut state = CharacterState {
            grounded: true,
            jump_requested: true,
            platform: Some(bridge),
            ..Default::default()
        };
        let mut anim = AnimatorParams::new();

        let outcome = controller().step(InputSample::new(1.0, -1.0, false), &mut state, &mut body, &mut anim);

        assert_eq!(outcome, MoveOutcome::DropThrough(bridge));
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
        assert!(!state.jump_requested);
        assert!(!state.grounded);
    }

    #[test]
    fn jump_on_bridge_without_down_is_a_normal_jump() {
        let mut body = FakeBody::default();
        let mut state = CharacterState {
            grounded: true,
            jump_requested: true,
            platform: Some(platform(7)),
            ..Default::default()
        };
        let mut anim = AnimatorParams::new();

        let outcome = controller().step(InputSample::new(0.0, -0.4, false), &mut state, &mut body, &mut anim);
        assert!(matches!(outcome, MoveOutcome::Moved(v) if v.y == 8.0));
    }
}
