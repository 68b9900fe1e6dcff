//! One-way platforms: contact tracking and the drop-through maneuver.

use engine_core::{Clock, Delay, FrameTime, Tag};

use crate::character::{CharacterBody, PlatformHandle};

/// Anything that wants to know which bridge it is standing on.
pub trait BridgeRider {
    fn set_on_bridge(&mut self, platform: Option<PlatformHandle>);
}

/// Contact tracker attached to a bridge collider.
#[derive(Debug, Clone, Copy)]
pub struct Bridge {
    pub collider: PlatformHandle,
}

impl Bridge {
    pub fn new(collider: PlatformHandle) -> Self {
        Self { collider }
    }

    pub fn on_contact_started(&self, other: Tag, rider: &mut impl BridgeRider) {
        if other.is_player() {
            rider.set_on_bridge(Some(self.collider));
        }
    }

    pub fn on_contact_stopped(&self, other: Tag, rider: &mut impl BridgeRider) {
        if other.is_player() {
            rider.set_on_bridge(None);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropState {
    #[default]
    Idle,
    Dropping { platform: PlatformHandle },
}

/// Temporarily disables collision with one platform, then restores it after
/// a wall-clock delay that keeps running through pauses.
#[derive(Debug, Clone, Copy)]
pub struct DropThrough {
    state: DropState,
    delay: Delay,
    duration: f32,
}

impl DropThrough {
    pub fn new(duration: f32) -> Self {
        Self {
            state: DropState::Idle,
            delay: Delay::new(Clock::Unscaled),
            duration,
        }
    }

    pub fn state(&self) -> DropState {
        self.state
    }

    pub fn is_dropping(&self) -> bool {
        matches!(self.state, DropState::Dropping { .. })
    }

    /// Start dropping through `platform`. The handle is captured here, so later
    /// platform changes don't affect this run. A run already in flight is
    /// cancelled and its platform restored first.
    pub fn begin(&mut self, platform: PlatformHandle, body: &mut impl CharacterBody) {
        if let DropState::Dropping { platform: previous } = self.state {
            self.delay.cancel();
            body.set_platform_ignored(previous, false);
        }
        body.set_platform_ignored(platform, true);
        self.delay.start(self.duration);
        self.state = DropState::Dropping { platform };
        log::debug!("Dropping through {:?}", platform);
    }

    /// Advance the delay; restores the platform on the tick it elapses.
    pub fn tick(&mut self, frame: FrameTime, body: &mut impl CharacterBody) -> bool {
        if !self.delay.tick(frame) {
            return false;
        }
        if let DropState::Dropping { platform } = self.state {
            body.set_platform_ignored(platform, false);
            log::debug!("Restored collision with {:?}", platform);
        }
        self.state = DropState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::testing::{platform, FakeBody};

    #[derive(Default)]
    struct Rider {
        platform: Option<PlatformHandle>,
    }

    impl BridgeRider for Rider {
        fn set_on_bridge(&mut self, platform: Option<PlatformHandle>) {
            self.platform = platform;
        }
    }

    #[test]
    fn contact_records_and_clears_platform_for_players_only() {
        let bridge = Bridge::new(platform(3));
        let mut rider = Rider::default();

        bridge.on_contact_started(Tag::Untagged, &mut rider);
        assert_eq!(rider.platform, None);

        bridge.on_contact_started(Tag::Player, &mut rider);
        assert_eq!(rider.platform, Some(platform(3)));

        bridge.on_contact_stopped(Tag::Collectable, &mut rider);
        assert_eq!(rider.platform, Some(platform(3)));

        bridge.on_contact_stopped(Tag::Player, &mut rider);
        assert_eq!(rider.platform, None);
    }

    #[test]
    fn collision_restores_after_exactly_the_delay() {
        let mut body = FakeBody::default();
        let mut drop = DropThrough::new(0.5);
        drop.begin(platform(1), &mut body);
        assert!(body.ignored.contains(&platform(1)));

        assert!(!drop.tick(FrameTime::running(0.25), &mut body));
        assert!(body.ignored.contains(&platform(1)));
        assert!(drop.tick(FrameTime::running(0.25), &mut body));
        assert!(body.ignored.is_empty());
        assert_eq!(drop.state(), DropState::Idle);
    }

    #[test]
    fn delay_runs_on_wall_clock_through_a_pause() {
        let mut body = FakeBody::default();
        let mut drop = DropThrough::new(0.5);
        drop.begin(platform(1), &mut body);
        drop.tick(FrameTime::paused(0.3), &mut body);
        assert!(drop.tick(FrameTime::paused(0.3), &mut body));
        assert!(body.ignored.is_empty());
    }

    #[test]
    fn restart_restores_the_first_platform_and_suppresses_only_the_second() {
        let mut body = FakeBody::default();
        let mut drop = DropThrough::new(0.5);
        drop.begin(platform(1), &mut body);
        drop.tick(FrameTime::running(0.25), &mut body);
        drop.begin(platform(2), &mut body);

        assert_eq!(body.ignored.len(), 1);
        assert!(body.ignored.contains(&platform(2)));

        // The second run gets its full delay.
        assert!(!drop.tick(FrameTime::running(0.25), &mut body));
        assert!(drop.tick(FrameTime::running(0.25), &mut body));
        assert!(body.ignored.is_empty());
    }
}
