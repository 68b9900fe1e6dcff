//! Character state and the physics seam it drives.

use engine_core::Bounds;
use glam::Vec2;
use physics::{ColliderHandle, Group, PhysicsBody, PhysicsWorld};

/// Opaque reference to the one-way platform the character stands on.
pub type PlatformHandle = ColliderHandle;

/// Mutable state owned by the player controller. Nothing outside the
/// controller writes to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterState {
    pub grounded: bool,
    pub in_water: bool,
    pub died: bool,
    pub jump_requested: bool,
    pub platform: Option<PlatformHandle>,
    pub initial_position: Vec2,
    pub facing_left: bool,
}

impl CharacterState {
    pub fn new(initial_position: Vec2) -> Self {
        Self {
            initial_position,
            ..Default::default()
        }
    }
}

/// What the controller needs from a physics body.
pub trait CharacterBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn set_position(&mut self, position: Vec2);
    /// World-space collision footprint.
    fn footprint(&self) -> Bounds;
    /// Does a circle overlap any solid surface in `mask` (excluding the body itself)?
    fn overlaps(&self, center: Vec2, radius: f32, mask: Group) -> bool;
    /// Toggle contacts between this body and one platform.
    fn set_platform_ignored(&mut self, platform: PlatformHandle, ignored: bool);
}

/// [`CharacterBody`] backed by a rapier body in a [`PhysicsWorld`].
pub struct RapierCharacter<'w> {
    physics: &'w mut PhysicsWorld,
    body: PhysicsBody,
}

impl<'w> RapierCharacter<'w> {
    pub fn new(physics: &'w mut PhysicsWorld, body: PhysicsBody) -> Self {
        Self { physics, body }
    }
}

impl CharacterBody for RapierCharacter<'_> {
    fn velocity(&self) -> Vec2 {
        self.physics.body_velocity(self.body.rigid_body).unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.physics.set_body_velocity(self.body.rigid_body, velocity);
    }

    fn set_position(&mut self, position: Vec2) {
        self.physics.set_body_position(self.body.rigid_body, position);
    }

    fn footprint(&self) -> Bounds {
        // Presence is checked once when the scene is built.
        self.physics.collider_bounds(self.body.collider).unwrap_or_default()
    }

    fn overlaps(&self, center: Vec2, radius: f32, mask: Group) -> bool {
        self.physics
            .overlap_circle(center, radius, mask, Some(self.body.collider))
            .is_some()
    }

    fn set_platform_ignored(&mut self, platform: PlatformHandle, ignored: bool) {
        self.physics.set_collision_ignored(self.body.collider, platform, ignored);
    }
}
