//! Oxygen and fuel counters with change broadcast.
//!
//! Listeners subscribe to a ledger instance and receive `(new total, kind)`
//! over their own channel. A subscription ends when the listener calls
//! [`ResourceLedger::unsubscribe`] or simply drops its [`Subscription`].

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Oxygen,
    Fuel,
}

/// Broadcast payload: the resource's total after the update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceChange {
    pub total: i32,
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end held by a listener.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<ResourceChange>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Every change delivered since the last call, oldest first.
    pub fn drain(&self) -> Vec<ResourceChange> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Debug, Default)]
pub struct ResourceLedger {
    oxygen: i32,
    fuel: i32,
    subscribers: Vec<(SubscriptionId, Sender<ResourceChange>)>,
    next_id: u64,
}

impl ResourceLedger {
    pub fn new(oxygen: i32, fuel: i32) -> Self {
        Self {
            oxygen: oxygen.max(0),
            fuel,
            ..Default::default()
        }
    }

    pub fn oxygen(&self) -> i32 {
        self.oxygen
    }

    /// May be negative; fuel has no floor.
    pub fn fuel(&self) -> i32 {
        self.fuel
    }

    pub fn get(&self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Oxygen => self.oxygen,
            ResourceKind::Fuel => self.fuel,
        }
    }

    pub fn subscribe(&mut self) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let (sender, receiver) = channel();
        self.subscribers.push((id, sender));
        Subscription { id, receiver }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub, _)| *sub != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Add `amount` (negative to debit) and broadcast the new total.
    /// Oxygen is clamped at zero.
    pub fn update_resource(&mut self, amount: i32, kind: ResourceKind) -> i32 {
        let total = match kind {
            ResourceKind::Oxygen => {
                self.oxygen = self.oxygen.saturating_add(amount).max(0);
                self.oxygen
            }
            ResourceKind::Fuel => {
                self.fuel = self.fuel.saturating_add(amount);
                self.fuel
            }
        };
        log::debug!("{:?} {:+} -> {}", kind, amount, total);
        self.broadcast(ResourceChange { total, kind });
        total
    }

    fn broadcast(&mut self, change: ResourceChange) {
        // A failed send means the listener dropped its receiver.
        self.subscribers.retain(|(_, sender)| sender.send(change).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oxygen_never_goes_negative() {
        let mut ledger = ResourceLedger::new(2, 0);
        for amount in [-1, -5, 3, -10, -1, 0, 1, -2] {
            ledger.update_resource(amount, ResourceKind::Oxygen);
            assert!(ledger.oxygen() >= 0);
        }
        assert_eq!(ledger.oxygen(), 0);
    }

    #[test]
    fn fuel_has_no_floor() {
        let mut ledger = ResourceLedger::new(0, 1);
        assert_eq!(ledger.update_resource(-4, ResourceKind::Fuel), -3);
    }

    #[test]
    fn two_fuel_pickups_broadcast_running_totals_in_order() {
        let mut ledger = ResourceLedger::new(0, 0);
        let sub = ledger.subscribe();
        ledger.update_resource(3, ResourceKind::Fuel);
        ledger.update_resource(3, ResourceKind::Fuel);

        assert_eq!(ledger.fuel(), 6);
        assert_eq!(
            sub.drain(),
            vec![
                ResourceChange { total: 3, kind: ResourceKind::Fuel },
                ResourceChange { total: 6, kind: ResourceKind::Fuel },
            ]
        );
    }

    #[test]
    fn every_subscriber_hears_every_change() {
        let mut ledger = ResourceLedger::new(0, 0);
        let a = ledger.subscribe();
        let b = ledger.subscribe();
        ledger.update_resource(2, ResourceKind::Oxygen);
        assert_eq!(a.drain().len(), 1);
        assert_eq!(b.drain().len(), 1);
    }

    #[test]
    fn unsubscribed_and_dropped_listeners_stop_receiving() {
        let mut ledger = ResourceLedger::new(0, 0);
        let kept = ledger.subscribe();
        let removed = ledger.subscribe();
        let dropped = ledger.subscribe();

        ledger.unsubscribe(removed.id());
        drop(dropped);
        ledger.update_resource(1, ResourceKind::Oxygen);

        assert_eq!(ledger.subscriber_count(), 1);
        assert_eq!(kept.drain().len(), 1);
        assert!(removed.drain().is_empty());
    }

    #[test]
    fn broadcast_with_no_listeners_still_updates() {
        let mut ledger = ResourceLedger::new(0, 0);
        assert_eq!(ledger.update_resource(4, ResourceKind::Oxygen), 4);
    }
}
