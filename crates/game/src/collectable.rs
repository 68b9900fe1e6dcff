//! One-shot resource pickups.

use engine_core::Tag;
use serde::{Deserialize, Serialize};

use crate::resources::{ResourceKind, ResourceLedger};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectableSize {
    Small,
    #[default]
    Normal,
}

/// Amount granted per size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupAmounts {
    pub small: i32,
    pub normal: i32,
}

impl Default for PickupAmounts {
    fn default() -> Self {
        Self { small: 1, normal: 3 }
    }
}

impl PickupAmounts {
    pub fn for_size(&self, size: CollectableSize) -> i32 {
        match size {
            CollectableSize::Small => self.small,
            CollectableSize::Normal => self.normal,
        }
    }
}

/// Anything that can be credited by a pickup.
pub trait Collector {
    fn update_resource(&mut self, amount: i32, kind: ResourceKind);
}

impl Collector for ResourceLedger {
    fn update_resource(&mut self, amount: i32, kind: ResourceKind) {
        ResourceLedger::update_resource(self, amount, kind);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Collectable {
    pub kind: ResourceKind,
    pub amount: i32,
    consumed: bool,
}

impl Collectable {
    pub fn new(kind: ResourceKind, size: CollectableSize, amounts: &PickupAmounts) -> Self {
        Self {
            kind,
            amount: amounts.for_size(size),
            consumed: false,
        }
    }

    #[cfg(test)]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Credit a player on first touch. Returns true if the pickup was consumed
    /// by this call; the caller then deactivates it.
    pub fn on_trigger_enter(&mut self, other: Tag, collector: &mut impl Collector) -> bool {
        if self.consumed || !other.is_player() {
            return false;
        }
        collector.update_resource(self.amount, self.kind);
        self.consumed = true;
        true
    }
}
