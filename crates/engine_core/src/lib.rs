//! Core engine types and utilities for Aquanaut.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Time management and the simulation run/pause state
//! - Restartable timers that stand in for coroutines
//! - Common component types for ECS
//! - Setup errors

pub mod components;
pub mod error;
pub mod time;
pub mod timer;

pub use components::*;
pub use error::*;
pub use time::*;
pub use timer::*;

// Re-export commonly used types
pub use glam::Vec2;
pub use hecs::{Entity, World};
