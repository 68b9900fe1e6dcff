//! Console HUD: resource counters fed by ledger broadcasts.

use crate::resources::{ResourceKind, ResourceLedger, Subscription};

/// Text panel showing one resource. Only reacts to changes of its own kind.
#[derive(Debug)]
pub struct ResourcePanel {
    kind: ResourceKind,
    subscription: Subscription,
    text: String,
}

impl ResourcePanel {
    /// Subscribe to `ledger` and show its current total.
    pub fn new(kind: ResourceKind, ledger: &mut ResourceLedger) -> Self {
        let subscription = ledger.subscribe();
        Self {
            kind,
            subscription,
            text: ledger.get(kind).to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply pending changes. Returns true if the text changed.
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        for change in self.subscription.drain() {
            if change.kind == self.kind {
                self.text = change.total.to_string();
                changed = true;
            }
        }
        changed
    }

    /// Stop listening.
    pub fn detach(self, ledger: &mut ResourceLedger) {
        ledger.unsubscribe(self.subscription.id());
    }
}

/// Everything the console HUD shows for a frame.
#[derive(Debug, Clone, Default)]
pub struct HudData {
    pub oxygen: String,
    pub fuel: String,
    pub in_water: bool,
    pub grounded: bool,
    pub is_alive: bool,
    pub water_alpha: f32,
    pub game_time: f32,
}

pub struct HudSystem {
    pub oxygen: ResourcePanel,
    pub fuel: ResourcePanel,
}

impl HudSystem {
    pub fn new(ledger: &mut ResourceLedger) -> Self {
        Self {
            oxygen: ResourcePanel::new(ResourceKind::Oxygen, ledger),
            fuel: ResourcePanel::new(ResourceKind::Fuel, ledger),
        }
    }

    /// Pull ledger changes into both panels.
    pub fn refresh(&mut self) -> bool {
        let oxygen = self.oxygen.refresh();
        let fuel = self.fuel.refresh();
        oxygen || fuel
    }

    pub fn render_console_hud(&self, data: &HudData) -> String {
        let mut output = format!(
            "O2: {:>3}  FUEL: {:>3}  │  {}  │  water {}  │  t={:6.2}s",
            data.oxygen,
            data.fuel,
            if data.grounded { "GROUND" } else { "AIR   " },
            self.alpha_bar(data.water_alpha, 10),
            data.game_time,
        );
        if data.in_water {
            output.push_str("  ~SUBMERGED~");
        }
        if !data.is_alive {
            output.push_str("  ** YOU DROWNED **");
        }
        output
    }

    fn alpha_bar(&self, alpha: f32, width: usize) -> String {
        let filled = (alpha.clamp(0.0, 1.0) * width as f32).round() as usize;
        format!("{}{}", "▓".repeat(filled), "░".repeat(width - filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_shows_only_its_own_kind() {
        let mut ledger = ResourceLedger::new(5, 0);
        let mut panel = ResourcePanel::new(ResourceKind::Oxygen, &mut ledger);
        assert_eq!(panel.text(), "5");

        ledger.update_resource(3, ResourceKind::Fuel);
        assert!(!panel.refresh());
        assert_eq!(panel.text(), "5");

        ledger.update_resource(-1, ResourceKind::Oxygen);
        assert!(panel.refresh());
        assert_eq!(panel.text(), "4");
    }

    #[test]
    fn panel_shows_latest_of_several_changes() {
        let mut ledger = ResourceLedger::new(0, 0);
        let mut panel = ResourcePanel::new(ResourceKind::Fuel, &mut ledger);
        ledger.update_resource(3, ResourceKind::Fuel);
        ledger.update_resource(3, ResourceKind::Fuel);
        panel.refresh();
        assert_eq!(panel.text(), "6");
    }

    #[test]
    fn detached_panel_is_dropped_from_broadcast() {
        let mut ledger = ResourceLedger::new(0, 0);
        let panel = ResourcePanel::new(ResourceKind::Fuel, &mut ledger);
        assert_eq!(ledger.subscriber_count(), 1);
        panel.detach(&mut ledger);
        assert_eq!(ledger.subscriber_count(), 0);
    }

    #[test]
    fn console_line_flags_death() {
        let mut ledger = ResourceLedger::new(0, 0);
        let hud = HudSystem::new(&mut ledger);
        let line = hud.render_console_hud(&HudData {
            oxygen: "0".into(),
            fuel: "0".into(),
            in_water: true,
            is_alive: false,
            water_alpha: 0.7,
            ..Default::default()
        });
        assert!(line.contains("YOU DROWNED"));
        assert!(line.contains("SUBMERGED"));
    }
}
