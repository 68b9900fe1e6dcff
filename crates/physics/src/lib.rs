//! Physics system using Rapier2D for Aquanaut.

pub mod collision;
pub mod events;
pub mod hooks;
pub mod physics_world;
pub mod query;

pub use collision::*;
pub use events::*;
pub use hooks::*;
pub use physics_world::*;

// Re-export Rapier for downstream crates
pub use rapier2d;

// Re-export common Rapier types
pub use rapier2d::prelude::{ColliderHandle, Group, RigidBodyHandle};
