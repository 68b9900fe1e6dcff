//! Player controller and state.

use engine_core::{Clock, Delay, Time};
use glam::Vec2;
use input::InputSample;

use crate::animation::{self, AnimationSink};
use crate::bridge::{BridgeRider, DropThrough};
use crate::character::{CharacterBody, CharacterState, PlatformHandle};
use crate::collectable::Collector;
use crate::config::PlayerTuning;
use crate::ground::GroundSensor;
use crate::movement::{MoveOutcome, MovementController};
use crate::resources::{ResourceKind, ResourceLedger, Subscription};
use crate::survival::SurvivalTimer;
use crate::water::Swimmer;

/// Player controller handling movement, submersion and survival.
pub struct PlayerController {
    state: CharacterState,
    /// Latest input sample; read by the physics tick.
    input: InputSample,
    movement: MovementController,
    sensor: GroundSensor,
    drop_through: DropThrough,
    survival: SurvivalTimer,
    respawn_grace: Delay,
    respawn_grace_seconds: f32,
    ledger: ResourceLedger,
    deaths: u32,
}

impl PlayerController {
    pub fn new(tuning: &PlayerTuning, initial_position: Vec2) -> Self {
        Self {
            state: CharacterState::new(initial_position),
            input: InputSample::default(),
            movement: MovementController::new(tuning.speed, tuning.jump_speed, tuning.water_damping),
            sensor: GroundSensor::new(tuning.ground_check_radius),
            drop_through: DropThrough::new(tuning.drop_through_delay),
            survival: SurvivalTimer::new(tuning.oxygen_loss_interval),
            respawn_grace: Delay::new(Clock::Scaled),
            respawn_grace_seconds: tuning.respawn_grace,
            ledger: ResourceLedger::new(tuning.starting_oxygen, tuning.starting_fuel),
            deaths: 0,
        }
    }

    /// Visual tick: sample input, then advance this character's timers.
    pub fn update(
        &mut self,
        sample: InputSample,
        time: &mut Time,
        body: &mut impl CharacterBody,
        anim: &mut impl AnimationSink,
    ) {
        self.input = sample;
        MovementController::latch_jump(&mut self.state, sample.jump_pressed);
        self.update_look_direction();

        let frame = time.frame();
        self.drop_through.tick(frame, body);

        if self.survival.tick(frame, self.state.in_water, self.state.died) {
            let oxygen = self.ledger.update_resource(-1, ResourceKind::Oxygen);
            if oxygen == 0 {
                self.die(time, anim);
            }
        }

        if self.respawn_grace.tick(frame) {
            self.state.died = false;
            log::info!("Player can move again");
        }
    }

    /// Physics tick: ground probe, then movement unless dead.
    pub fn fixed_update(&mut self, body: &mut impl CharacterBody, anim: &mut impl AnimationSink) {
        self.state.grounded = self.sensor.probe(body, anim);

        if self.state.died {
            return;
        }
        if let MoveOutcome::DropThrough(platform) = self.movement.step(self.input, &mut self.state, body, anim) {
            self.drop_through.begin(platform, body);
        }
    }

    fn update_look_direction(&mut self) {
        if self.input.horizontal.abs() > f32::EPSILON {
            self.state.facing_left = self.input.horizontal < 0.0;
        }
    }

    pub fn set_in_water(&mut self, in_water: bool, anim: &mut impl AnimationSink) {
        self.state.in_water = in_water;
        anim.set_bool(animation::IN_WATER, in_water);
        if !in_water && !self.state.died {
            // Kick out of the water.
            self.state.jump_requested = true;
        }
        log::debug!("In water: {}", in_water);
    }

    pub fn set_on_bridge(&mut self, platform: Option<PlatformHandle>) {
        self.state.platform = platform;
    }

    pub fn update_resource(&mut self, amount: i32, kind: ResourceKind) -> i32 {
        self.ledger.update_resource(amount, kind)
    }

    /// Kill the character and freeze the simulation until respawn.
    pub fn die(&mut self, time: &mut Time, anim: &mut impl AnimationSink) {
        if self.state.died {
            return;
        }
        anim.set_trigger(animation::DIE);
        self.state.died = true;
        self.deaths += 1;
        time.pause();
        log::info!("Player died (deaths: {})", self.deaths);
    }

    /// Put the character back at its start, resume the simulation, and allow
    /// movement again after the grace period.
    pub fn respawn(&mut self, time: &mut Time, body: &mut impl CharacterBody) {
        if !self.state.died {
            return;
        }
        body.set_position(self.state.initial_position);
        body.set_velocity(Vec2::ZERO);
        time.resume();
        self.respawn_grace.start(self.respawn_grace_seconds);
        log::info!("Player respawned at {:?}", self.state.initial_position);
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state.died
    }

    pub fn facing_left(&self) -> bool {
        self.state.facing_left
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ResourceLedger {
        &mut self.ledger
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.ledger.subscribe()
    }

    pub fn ground_sensor(&self) -> &GroundSensor {
        &self.sensor
    }

    pub fn drop_through(&self) -> &DropThrough {
        &self.drop_through
    }
}

/// The player paired with its animator, as seen by bridges, water and pickups.
pub struct PlayerContact<'a, A: AnimationSink> {
    pub player: &'a mut PlayerController,
    pub anim: &'a mut A,
}

impl<A: AnimationSink> BridgeRider for PlayerContact<'_, A> {
    fn set_on_bridge(&mut self, platform: Option<PlatformHandle>) {
        self.player.set_on_bridge(platform);
    }
}

impl<A: AnimationSink> Swimmer for PlayerContact<'_, A> {
    fn set_in_water(&mut self, in_water: bool) {
        self.player.set_in_water(in_water, &mut *self.anim);
    }
}

impl<A: AnimationSink> Collector for PlayerContact<'_, A> {
    fn update_resource(&mut self, amount: i32, kind: ResourceKind) {
        self.player.update_resource(amount, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimatorParams;
    use crate::character::testing::{platform, FakeBody};
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(250);

    fn tuning() -> PlayerTuning {
        PlayerTuning {
            oxygen_loss_interval: 1.0,
            starting_oxygen: 1,
            ..Default::default()
        }
    }

    struct Rig {
        player: PlayerController,
        time: Time,
        body: FakeBody,
        anim: AnimatorParams,
    }

    impl Rig {
        fn new(tuning: PlayerTuning) -> Self {
            Self {
                player: PlayerController::new(&tuning, Vec2::new(0.0, 2.0)),
                time: Time::new(),
                body: FakeBody::default(),
                anim: AnimatorParams::new(),
            }
        }

        fn frame(&mut self, sample: InputSample) {
            self.time.advance(FRAME);
            self.player.update(sample, &mut self.time, &mut self.body, &mut self.anim);
        }

        fn fixed(&mut self) {
            self.player.fixed_update(&mut self.body, &mut self.anim);
        }
    }

    #[test]
    fn drowning_kills_once_and_freezes_movement() {
        let mut rig = Rig::new(tuning());
        rig.player.set_in_water(true, &mut rig.anim);

        for _ in 0..4 {
            rig.frame(InputSample::default());
        }
        assert!(!rig.player.is_dead());

        rig.frame(InputSample::default());
        assert_eq!(rig.player.ledger().oxygen(), 0);
        assert!(rig.player.is_dead());
        assert!(rig.time.is_paused());
        assert!(rig.anim.take_trigger(animation::DIE));

        // Input no longer moves the body.
        rig.frame(InputSample::new(1.0, 0.0, false));
        rig.fixed();
        assert_eq!(rig.body.velocity, Vec2::ZERO);

        for _ in 0..40 {
            rig.frame(InputSample::default());
        }
        assert_eq!(rig.player.deaths(), 1);
        assert!(!rig.anim.take_trigger(animation::DIE));
    }

    #[test]
    fn dry_character_never_drowns() {
        let mut rig = Rig::new(tuning());
        for _ in 0..40 {
            rig.frame(InputSample::default());
        }
        assert_eq!(rig.player.ledger().oxygen(), 1);
        assert!(!rig.player.is_dead());
    }

    #[test]
    fn grounded_jump_applies_on_next_physics_tick() {
        let mut rig = Rig::new(tuning());
        rig.body.ground_below = true;
        rig.fixed();

        rig.frame(InputSample::new(0.0, 0.0, true));
        assert!(rig.player.state().jump_requested);
        rig.fixed();

        assert_eq!(rig.body.velocity.y, 8.0);
        assert!(!rig.player.state().jump_requested);

        // Leaves the ground: the next probe clears grounded.
        rig.body.ground_below = false;
        rig.fixed();
        assert!(!rig.player.state().grounded);
    }

    #[test]
    fn down_jump_on_bridge_drops_through_for_half_a_second() {
        let mut rig = Rig::new(tuning());
        rig.body.ground_below = true;
        rig.fixed();
        rig.player.set_on_bridge(Some(platform(9)));
        rig.body.velocity = Vec2::new(0.5, 0.0);

        let down_jump = InputSample::new(0.0, -1.0, true);
        rig.frame(down_jump);
        rig.fixed();

        assert_eq!(rig.body.velocity, Vec2::new(0.5, 0.0));
        assert!(rig.body.ignored.contains(&platform(9)));
        assert!(rig.player.drop_through().is_dropping());

        // Walks off the bridge mid-drop; collision still comes back on time.
        rig.player.set_on_bridge(None);
        rig.frame(InputSample::default());
        assert!(rig.body.ignored.contains(&platform(9)));
        rig.frame(InputSample::default());
        assert!(rig.body.ignored.is_empty());
        assert_eq!(rig.body.ignore_calls, vec![(platform(9), true), (platform(9), false)]);
    }

    #[test]
    fn leaving_water_alive_kicks_a_jump() {
        let mut rig = Rig::new(tuning());
        rig.player.set_in_water(true, &mut rig.anim);
        assert!(rig.anim.get_bool(animation::IN_WATER));

        rig.player.set_in_water(false, &mut rig.anim);
        assert!(rig.player.state().jump_requested);
        assert!(!rig.anim.get_bool(animation::IN_WATER));
    }

    #[test]
    fn leaving_water_dead_does_not_kick() {
        let mut rig = Rig::new(tuning());
        rig.player.set_in_water(true, &mut rig.anim);
        rig.player.die(&mut rig.time, &mut rig.anim);
        rig.player.set_in_water(false, &mut rig.anim);
        assert!(!rig.player.state().jump_requested);
    }

    #[test]
    fn respawn_resumes_and_clears_death_after_grace() {
        let mut rig = Rig::new(tuning());
        rig.body.position = Vec2::new(10.0, -3.0);
        rig.body.velocity = Vec2::new(1.0, 1.0);
        rig.player.die(&mut rig.time, &mut rig.anim);
        assert!(rig.time.is_paused());

        rig.player.respawn(&mut rig.time, &mut rig.body);
        assert!(!rig.time.is_paused());
        assert_eq!(rig.body.position, Vec2::new(0.0, 2.0));
        assert_eq!(rig.body.velocity, Vec2::ZERO);
        assert!(rig.player.is_dead());

        rig.frame(InputSample::default());
        assert!(rig.player.is_dead());
        rig.frame(InputSample::default());
        assert!(!rig.player.is_dead());
    }

    #[test]
    fn respawn_while_alive_is_a_no_op() {
        let mut rig = Rig::new(tuning());
        rig.body.position = Vec2::new(4.0, 4.0);
        rig.player.respawn(&mut rig.time, &mut rig.body);
        assert_eq!(rig.body.position, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn look_direction_holds_when_input_is_idle() {
        let mut rig = Rig::new(tuning());
        rig.frame(InputSample::new(-1.0, 0.0, false));
        assert!(rig.player.facing_left());
        rig.frame(InputSample::default());
        assert!(rig.player.facing_left());
        rig.frame(InputSample::new(0.3, 0.0, false));
        assert!(!rig.player.facing_left());
    }

    #[test]
    fn pickups_through_contact_reach_the_ledger() {
        let mut rig = Rig::new(tuning());
        let sub = rig.player.subscribe();
        let mut contact = PlayerContact {
            player: &mut rig.player,
            anim: &mut rig.anim,
        };
        contact.update_resource(3, ResourceKind::Fuel);
        contact.update_resource(3, ResourceKind::Fuel);
        assert_eq!(rig.player.ledger().fuel(), 6);
        assert_eq!(sub.drain().len(), 2);
    }
}
