//! Animation parameter sink. The core writes named parameters and never reads them back.

use std::collections::HashMap;

pub const GROUNDED: &str = "Grounded";
pub const IN_WATER: &str = "InWater";
pub const HORIZONTAL_VELOCITY: &str = "HorizontalVelocity";
pub const VERTICAL_VELOCITY: &str = "VerticalVelocity";
pub const DIE: &str = "Die";

/// Fire-and-forget animation parameters.
pub trait AnimationSink {
    fn set_bool(&mut self, name: &'static str, value: bool);
    fn set_float(&mut self, name: &'static str, value: f32);
    fn set_trigger(&mut self, name: &'static str);
}

/// In-memory animator state, read by the renderer (and by tests).
#[derive(Debug, Default)]
pub struct AnimatorParams {
    bools: HashMap<&'static str, bool>,
    floats: HashMap<&'static str, f32>,
    triggers: Vec<&'static str>,
}

impl AnimatorParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    /// Consume a pending trigger. Returns true if it had been set.
    pub fn take_trigger(&mut self, name: &str) -> bool {
        match self.triggers.iter().position(|t| *t == name) {
            Some(index) => {
                self.triggers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pending_triggers(&self) -> &[&'static str] {
        &self.triggers
    }
}

impl AnimationSink for AnimatorParams {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.insert(name, value);
    }

    fn set_trigger(&mut self, name: &'static str) {
        self.triggers.push(name);
    }
}
