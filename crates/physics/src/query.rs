//! Overlap queries used by ground probes.

use crate::PhysicsWorld;
use glam::Vec2;
use rapier2d::prelude::*;

impl PhysicsWorld {
    /// First solid collider overlapping a circle whose membership intersects `mask`.
    /// Sensors are skipped, and so is `exclude` (usually the querying body's own collider).
    pub fn overlap_circle(
        &self,
        center: Vec2,
        radius: f32,
        mask: Group,
        exclude: Option<ColliderHandle>,
    ) -> Option<ColliderHandle> {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y);
        let mut filter = QueryFilter::default()
            .exclude_sensors()
            .groups(InteractionGroups::new(Group::ALL, mask));
        if let Some(handle) = exclude {
            filter = filter.exclude_collider(handle);
        }

        self.query_pipeline.intersection_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
        )
    }

    /// Find all colliders within a circle, sensors included.
    pub fn overlap_circle_all(&self, center: Vec2, radius: f32) -> Vec<ColliderHandle> {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y);
        let filter = QueryFilter::default();

        let mut results = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
            |collider| {
                results.push(collider);
                true // Continue searching
            },
        );

        results
    }
}
