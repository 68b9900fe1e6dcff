//! Collision groups and filtering.

use rapier2d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static level geometry the character can stand on
    Ground = 1 << 0,
    /// Player character
    Player = 1 << 1,
    /// One-way platforms that can be dropped through
    Bridge = 1 << 2,
    /// Water volumes (sensors)
    Water = 1 << 3,
    /// Pickups (sensors)
    Pickup = 1 << 4,
}

impl CollisionGroup {
    pub fn bits(self) -> Group {
        Group::from_bits_retain(self as u32)
    }

    /// Create a collision group for level geometry.
    pub fn ground() -> (Group, Group) {
        (Self::Ground.bits(), Group::ALL)
    }

    /// Create a collision group for the player.
    pub fn player() -> (Group, Group) {
        let membership = Self::Player.bits();
        let filter = Group::from_bits_retain(
            Self::Ground as u32 | Self::Bridge as u32 | Self::Water as u32 | Self::Pickup as u32,
        );
        (membership, filter)
    }

    /// Create a collision group for one-way platforms.
    pub fn bridge() -> (Group, Group) {
        (Self::Bridge.bits(), Self::Player.bits())
    }

    /// Create a collision group for water volumes.
    pub fn water() -> (Group, Group) {
        (Self::Water.bits(), Self::Player.bits())
    }

    /// Create a collision group for pickups.
    pub fn pickup() -> (Group, Group) {
        (Self::Pickup.bits(), Self::Player.bits())
    }

    /// Surfaces that count as "ground" for the feet probe.
    pub fn standable() -> Group {
        Group::from_bits_retain(Self::Ground as u32 | Self::Bridge as u32)
    }

    pub(crate) fn interaction((membership, filter): (Group, Group)) -> InteractionGroups {
        InteractionGroups::new(membership, filter)
    }
}

/// Component linking an ECS entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

impl PhysicsBody {
    pub fn new(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self { rigid_body, collider }
    }
}
