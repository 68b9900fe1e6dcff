//! Game state and the per-frame schedule.
//!
//! One visual frame:
//! 1. advance the clock;
//! 2. run every due physics tick (none while paused): ground probe and
//!    movement, physics step, contact dispatch;
//! 3. visual tick: input latch, look direction, then timers (drop-through on
//!    wall-clock time; survival, respawn grace and water fades on game time);
//! 4. clear input edges.

use engine_core::{SetupError, Time};
use glam::Vec2;
use hecs::{Entity, World};
use input::InputState;
use physics::{ColliderHandle, PhysicsBody, PhysicsWorld};
use std::collections::HashMap;
use std::time::Duration;

use crate::animation::AnimatorParams;
use crate::character::RapierCharacter;
use crate::config::GameConfig;
use crate::hud::{HudData, HudSystem};
use crate::level::LevelLayout;
use crate::player::PlayerController;
use crate::water::WaterZone;

pub struct GameState {
    pub config: GameConfig,
    pub time: Time,
    pub input: InputState,
    pub physics: PhysicsWorld,
    pub world: World,
    pub player: PlayerController,
    pub player_body: PhysicsBody,
    pub anim: AnimatorParams,
    pub hud: HudSystem,
    /// Trigger and bridge colliders → owning entity.
    pub(crate) colliders: HashMap<ColliderHandle, Entity>,
}

impl GameState {
    /// Build the scene. Fails if the tuning is out of range or the player
    /// lacks a body or collider.
    pub fn new(config: GameConfig, layout: &LevelLayout) -> Result<Self, SetupError> {
        config.validate()?;

        let mut time = Time::new();
        time.set_fixed_rate(config.fixed_rate);
        let mut physics = PhysicsWorld::new();
        physics.set_timestep(time.fixed_timestep_seconds());

        let mut world = World::new();
        let scene = layout.spawn(&mut physics, &mut world, &config.water, &config.collectables);

        if !physics.has_body(scene.player.rigid_body) {
            return Err(SetupError::MissingBody("player"));
        }
        if !physics.has_collider(scene.player.collider) {
            return Err(SetupError::MissingCollider("player"));
        }
        physics.update_query_pipeline();

        let mut player = PlayerController::new(&config.player, layout.spawn_point());
        let hud = HudSystem::new(player.ledger_mut());

        Ok(Self {
            config,
            time,
            input: InputState::new(),
            physics,
            world,
            player,
            player_body: scene.player,
            anim: AnimatorParams::new(),
            hud,
            colliders: scene.colliders,
        })
    }

    /// Run one visual frame of `delta` wall-clock time.
    pub fn frame(&mut self, delta: Duration) {
        self.time.advance(delta);

        while self.time.should_fixed_update() {
            self.fixed_update();
        }

        self.update();
        self.input.begin_frame();
    }

    fn fixed_update(&mut self) {
        let mut body = RapierCharacter::new(&mut self.physics, self.player_body);
        self.player.fixed_update(&mut body, &mut self.anim);

        self.physics.step();
        self.dispatch_contact_events();
    }

    fn update(&mut self) {
        let sample = self.input.sample();
        let mut body = RapierCharacter::new(&mut self.physics, self.player_body);
        self.player.update(sample, &mut self.time, &mut body, &mut self.anim);

        let frame = self.time.frame();
        for (_, zone) in self.world.query_mut::<&mut WaterZone>() {
            zone.tick(frame);
        }

        self.hud.refresh();
    }

    /// Force the player's death from outside the survival cycle.
    pub fn die(&mut self) {
        self.player.die(&mut self.time, &mut self.anim);
    }

    /// Bring a dead player back. No effect while alive.
    pub fn respawn(&mut self) {
        let mut body = RapierCharacter::new(&mut self.physics, self.player_body);
        self.player.respawn(&mut self.time, &mut body);
    }

    pub fn player_position(&self) -> Vec2 {
        self.physics
            .body_position(self.player_body.rigid_body)
            .unwrap_or(Vec2::ZERO)
    }

    /// Feet probe circle (centre, radius) for debug drawing.
    pub fn ground_gizmo(&self) -> Option<(Vec2, f32)> {
        let bounds = self.physics.collider_bounds(self.player_body.collider)?;
        Some((bounds.bottom_center(), self.player.ground_sensor().radius))
    }

    /// Lowest alpha among water zones; the most revealed pool wins.
    pub fn water_alpha(&self) -> f32 {
        self.world
            .query::<&WaterZone>()
            .iter()
            .map(|(_, zone)| zone.alpha())
            .fold(1.0, f32::min)
    }

    pub fn hud_data(&self) -> HudData {
        let state = self.player.state();
        HudData {
            oxygen: self.hud.oxygen.text().to_string(),
            fuel: self.hud.fuel.text().to_string(),
            in_water: state.in_water,
            grounded: state.grounded,
            is_alive: !state.died,
            water_alpha: self.water_alpha(),
            game_time: self.time.game_elapsed_seconds(),
        }
    }
}
