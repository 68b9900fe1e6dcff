//! Feet probe.

use glam::Vec2;
use physics::{CollisionGroup, Group};

use crate::animation::{self, AnimationSink};
use crate::character::CharacterBody;

/// Circle overlap at the bottom of the character's footprint.
#[derive(Debug, Clone, Copy)]
pub struct GroundSensor {
    pub radius: f32,
    pub mask: Group,
}

impl GroundSensor {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            mask: CollisionGroup::standable(),
        }
    }

    /// Where the probe circle is centred. Also used for debug drawing.
    pub fn origin(&self, body: &impl CharacterBody) -> Vec2 {
        body.footprint().bottom_center()
    }

    /// Query the surface below and forward the result to animation.
    pub fn probe(&self, body: &impl CharacterBody, anim: &mut impl AnimationSink) -> bool {
        let grounded = body.overlaps(self.origin(body), self.radius, self.mask);
        anim.set_bool(animation::GROUNDED, grounded);
        grounded
    }
}
