//! Collision/trigger event collection.

use std::sync::Mutex;

use rapier2d::prelude::*;

/// A contact transition between two colliders, delivered once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Started(ColliderHandle, ColliderHandle),
    Stopped(ColliderHandle, ColliderHandle),
}

impl ContactEvent {
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            ContactEvent::Started(a, b) | ContactEvent::Stopped(a, b) => (a, b),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, ContactEvent::Started(..))
    }

    /// The collider paired with `collider`, if it takes part in this event.
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        let (a, b) = self.colliders();
        if a == collider {
            Some(b)
        } else if b == collider {
            Some(a)
        } else {
            None
        }
    }
}

impl From<CollisionEvent> for ContactEvent {
    fn from(event: CollisionEvent) -> Self {
        match event {
            CollisionEvent::Started(a, b, _) => ContactEvent::Started(a, b),
            CollisionEvent::Stopped(a, b, _) => ContactEvent::Stopped(a, b),
        }
    }
}

/// Buffers events raised during a physics step until the game drains them.
#[derive(Debug, Default)]
pub struct ContactEventCollector {
    events: Mutex<Vec<ContactEvent>>,
}

impl ContactEventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: ContactEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }

    /// Take every buffered event in arrival order.
    pub fn drain(&self) -> Vec<ContactEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for ContactEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.push(event.into());
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
