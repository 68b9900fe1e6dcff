//! Contact filtering: per-pair collision suppression and one-way bridges.

use std::collections::HashSet;

use rapier2d::prelude::*;

use crate::collision::CollisionGroup;

/// Physics hooks consulted by the narrow phase for colliders that opt in with
/// `ActiveHooks::FILTER_CONTACT_PAIRS`.
#[derive(Debug, Default)]
pub struct ContactFilter {
    /// Stored in both orders so lookups don't care which collider comes first.
    ignored: HashSet<(ColliderHandle, ColliderHandle)>,
}

impl ContactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ignored(&mut self, a: ColliderHandle, b: ColliderHandle, ignored: bool) {
        if ignored {
            self.ignored.insert((a, b));
            self.ignored.insert((b, a));
        } else {
            self.ignored.remove(&(a, b));
            self.ignored.remove(&(b, a));
        }
    }

    pub fn is_ignored(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        self.ignored.contains(&(a, b))
    }

    /// Number of suppressed pairs.
    pub fn ignored_pairs(&self) -> usize {
        self.ignored.len() / 2
    }

    /// Drop every pair involving `collider` (used when a collider is removed).
    pub fn forget(&mut self, collider: ColliderHandle) {
        self.ignored.retain(|&(a, b)| a != collider && b != collider);
    }
}

fn is_bridge(colliders: &ColliderSet, handle: ColliderHandle) -> bool {
    colliders
        .get(handle)
        .is_some_and(|c| c.collision_groups().memberships.contains(CollisionGroup::Bridge.bits()))
}

/// Upward speed below this still counts as resting on a bridge (solver jitter).
const RISING_SPEED: Real = 0.05;

fn rising(bodies: &RigidBodySet, body: Option<RigidBodyHandle>) -> bool {
    body.and_then(|h| bodies.get(h)).is_some_and(|b| b.linvel().y > RISING_SPEED)
}

impl PhysicsHooks for ContactFilter {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        if self.is_ignored(context.collider1, context.collider2) {
            return None;
        }

        // Bridges only block from above.
        if is_bridge(context.colliders, context.collider1) && rising(context.bodies, context.rigid_body2) {
            return None;
        }
        if is_bridge(context.colliders, context.collider2) && rising(context.bodies, context.rigid_body1) {
            return None;
        }

        Some(SolverFlags::COMPUTE_IMPULSES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignoring_is_symmetric_and_reversible() {
        let a = ColliderHandle::from_raw_parts(1, 0);
        let b = ColliderHandle::from_raw_parts(2, 0);
        let mut filter = ContactFilter::new();

        filter.set_ignored(a, b, true);
        assert!(filter.is_ignored(a, b));
        assert!(filter.is_ignored(b, a));
        assert_eq!(filter.ignored_pairs(), 1);

        filter.set_ignored(b, a, false);
        assert!(!filter.is_ignored(a, b));
        assert_eq!(filter.ignored_pairs(), 0);
    }

    #[test]
    fn forget_drops_pairs_for_removed_collider() {
        let a = ColliderHandle::from_raw_parts(1, 0);
        let b = ColliderHandle::from_raw_parts(2, 0);
        let c = ColliderHandle::from_raw_parts(3, 0);
        let mut filter = ContactFilter::new();
        filter.set_ignored(a, b, true);
        filter.set_ignored(a, c, true);
        filter.forget(b);
        assert!(!filter.is_ignored(a, b));
        assert!(filter.is_ignored(a, c));
    }
}
