//! Contact event routing for GameState.
//!
//! Each physics contact is offered to the entity behind either collider. The
//! receiving component sees the other collider's tag and decides whether to
//! react; the player controller is the only rider, swimmer and collector.

use hecs::Entity;
use physics::{ColliderHandle, ContactEvent};

use crate::bridge::Bridge;
use crate::collectable::Collectable;
use crate::level::SceneCollider;
use crate::player::PlayerContact;
use crate::water::WaterZone;

impl crate::GameState {
    /// Route the contacts raised by the last physics step.
    pub(crate) fn dispatch_contact_events(&mut self) {
        let mut consumed: Vec<Entity> = Vec::new();

        for event in self.physics.drain_contact_events() {
            let (a, b) = event.colliders();
            for (receiver, other) in [(a, b), (b, a)] {
                if let Some(entity) = self.route(event, receiver, other) {
                    consumed.push(entity);
                }
            }
        }

        for entity in consumed {
            self.remove_trigger(entity);
        }
    }

    /// Deliver one side of a contact. Returns the entity if a pickup was consumed.
    fn route(&mut self, event: ContactEvent, receiver: ColliderHandle, other: ColliderHandle) -> Option<Entity> {
        let entity = *self.colliders.get(&receiver)?;
        let tag = self.physics.collider_tag(other);
        let mut contact = PlayerContact {
            player: &mut self.player,
            anim: &mut self.anim,
        };

        if let Ok(bridge) = self.world.get::<&Bridge>(entity) {
            match event {
                ContactEvent::Started(..) => bridge.on_contact_started(tag, &mut contact),
                ContactEvent::Stopped(..) => bridge.on_contact_stopped(tag, &mut contact),
            }
            return None;
        }

        if let Ok(mut zone) = self.world.get::<&mut WaterZone>(entity) {
            match event {
                ContactEvent::Started(..) => zone.on_enter(tag, &mut contact),
                ContactEvent::Stopped(..) => zone.on_exit(tag, &mut contact),
            }
            return None;
        }

        if let Ok(mut pickup) = self.world.get::<&mut Collectable>(entity) {
            if event.is_started() && pickup.on_trigger_enter(tag, &mut contact) {
                log::info!("Collected {} {:?}", pickup.amount, pickup.kind);
                return Some(entity);
            }
        }
        None
    }

    /// Deactivate a consumed trigger: no further contacts, no entity.
    fn remove_trigger(&mut self, entity: Entity) {
        if let Ok(SceneCollider(collider)) = self.world.get::<&SceneCollider>(entity).map(|c| *c) {
            self.physics.remove_collider(collider);
            self.colliders.remove(&collider);
        }
        if self.world.despawn(entity).is_err() {
            log::warn!("Trigger {:?} already despawned", entity);
        }
    }
}

