//! Level layout: static geometry, bridges, water and pickups.
//!
//! A layout is plain data (loadable from `level.ron`). `spawn` turns it into
//! colliders in the physics world and entities in the ECS world, and returns
//! the collider → entity map that contact dispatch routes through.

use glam::Vec2;
use hecs::{Entity, World};
use physics::{ColliderHandle, PhysicsBody, PhysicsWorld};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::bridge::Bridge;
use crate::collectable::{Collectable, CollectableSize, PickupAmounts};
use crate::config::WaterTuning;
use crate::resources::ResourceKind;
use crate::water::WaterZone;

/// Radius of every pickup trigger.
pub const PICKUP_RADIUS: f32 = 0.25;

/// Axis-aligned box given by centre and half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub center: [f32; 2],
    pub half_extents: [f32; 2],
}

impl BoxShape {
    pub fn new(center: [f32; 2], half_extents: [f32; 2]) -> Self {
        Self { center, half_extents }
    }

    fn center(&self) -> Vec2 {
        Vec2::from(self.center)
    }

    fn half_extents(&self) -> Vec2 {
        Vec2::from(self.half_extents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupSpot {
    pub position: [f32; 2],
    pub kind: ResourceKind,
    #[serde(default)]
    pub size: CollectableSize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub spawn: [f32; 2],
    #[serde(default = "default_player_half_extents")]
    pub player_half_extents: [f32; 2],
    #[serde(default)]
    pub ground: Vec<BoxShape>,
    #[serde(default)]
    pub bridges: Vec<BoxShape>,
    #[serde(default)]
    pub water: Vec<BoxShape>,
    #[serde(default)]
    pub pickups: Vec<PickupSpot>,
}

fn default_player_half_extents() -> [f32; 2] {
    [0.3, 0.5]
}

/// Trigger collider owned by an entity; removed together with it.
#[derive(Debug, Clone, Copy)]
pub struct SceneCollider(pub ColliderHandle);

/// What `spawn` built.
pub struct Scene {
    pub player: PhysicsBody,
    pub colliders: HashMap<ColliderHandle, Entity>,
}

impl LevelLayout {
    /// Built-in level: a floor with a bridge, two fuel cans, an oxygen bubble
    /// on the bridge, and a pool at the far end.
    pub fn demo() -> Self {
        Self {
            spawn: [0.0, 1.0],
            player_half_extents: default_player_half_extents(),
            ground: vec![
                BoxShape::new([10.0, -0.5], [20.0, 0.5]),
                // Walls so the character can't walk off the world.
                BoxShape::new([-10.5, 5.0], [0.5, 5.0]),
                BoxShape::new([30.5, 5.0], [0.5, 5.0]),
            ],
            bridges: vec![BoxShape::new([7.0, 2.5], [2.0, 0.1])],
            water: vec![BoxShape::new([20.0, 1.5], [5.0, 1.5])],
            pickups: vec![
                PickupSpot {
                    position: [2.5, 0.5],
                    kind: ResourceKind::Fuel,
                    size: CollectableSize::Normal,
                },
                PickupSpot {
                    position: [4.0, 0.5],
                    kind: ResourceKind::Fuel,
                    size: CollectableSize::Normal,
                },
                PickupSpot {
                    position: [7.0, 3.1],
                    kind: ResourceKind::Oxygen,
                    size: CollectableSize::Small,
                },
            ],
        }
    }

    /// Load `level.ron` from the current directory, falling back to the demo level.
    pub fn load() -> Self {
        let path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("level.ron");
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(layout) => return layout,
                Err(e) => log::warn!("Invalid level at {:?}: {}, using demo level", path, e),
            }
        }
        Self::demo()
    }

    pub fn spawn_point(&self) -> Vec2 {
        Vec2::from(self.spawn)
    }

    /// Build colliders and entities.
    pub fn spawn(
        &self,
        physics: &mut PhysicsWorld,
        world: &mut World,
        water: &WaterTuning,
        amounts: &PickupAmounts,
    ) -> Scene {
        let player = physics.add_character(self.spawn_point(), Vec2::from(self.player_half_extents));
        let mut colliders = HashMap::new();

        for shape in &self.ground {
            physics.add_ground_box(shape.center(), shape.half_extents());
        }

        for shape in &self.bridges {
            let collider = physics.add_bridge(shape.center(), shape.half_extents());
            let entity = world.spawn((Bridge::new(collider), SceneCollider(collider)));
            colliders.insert(collider, entity);
        }

        for shape in &self.water {
            let collider = physics.add_water_volume(shape.center(), shape.half_extents());
            let zone = WaterZone::new(water.reveal_alpha, water.change_time);
            let entity = world.spawn((zone, SceneCollider(collider)));
            colliders.insert(collider, entity);
        }

        for spot in &self.pickups {
            let collider = physics.add_pickup(Vec2::from(spot.position), PICKUP_RADIUS);
            let pickup = Collectable::new(spot.kind, spot.size, amounts);
            let entity = world.spawn((pickup, SceneCollider(collider)));
            colliders.insert(collider, entity);
        }

        log::info!(
            "Level spawned: {} ground, {} bridges, {} water, {} pickups",
            self.ground.len(),
            self.bridges.len(),
            self.water.len(),
            self.pickups.len()
        );

        Scene { player, colliders }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Tag;

    #[test]
    fn demo_level_spawns_every_trigger_as_an_entity() {
        let layout = LevelLayout::demo();
        let mut physics = PhysicsWorld::new();
        let mut world = World::new();
        let scene = layout.spawn(&mut physics, &mut world, &WaterTuning::default(), &PickupAmounts::default());

        assert!(physics.has_body(scene.player.rigid_body));
        assert_eq!(physics.collider_tag(scene.player.collider), Tag::Player);
        assert_eq!(scene.colliders.len(), 1 + 1 + 3);
        assert_eq!(world.query::<&Collectable>().iter().count(), 3);
        assert_eq!(world.query::<&WaterZone>().iter().count(), 1);

        for (collider, entity) in &scene.colliders {
            let owned = world.get::<&SceneCollider>(*entity).unwrap();
            assert_eq!(owned.0, *collider);
        }
    }

    #[test]
    fn pickup_amounts_follow_size() {
        let layout = LevelLayout::demo();
        let mut physics = PhysicsWorld::new();
        let mut world = World::new();
        layout.spawn(&mut physics, &mut world, &WaterTuning::default(), &PickupAmounts::default());

        let mut amounts: Vec<(ResourceKind, i32)> = world
            .query::<&Collectable>()
            .iter()
            .map(|(_, c)| (c.kind, c.amount))
            .collect();
        amounts.sort_by_key(|(_, a)| *a);
        assert_eq!(
            amounts,
            vec![(ResourceKind::Oxygen, 1), (ResourceKind::Fuel, 3), (ResourceKind::Fuel, 3)]
        );
    }

    #[test]
    fn layout_parses_from_ron_with_defaults() {
        let layout: LevelLayout = ron::from_str(
            "(spawn: (1.0, 2.0), pickups: [(position: (3.0, 0.5), kind: Oxygen)])",
        )
        .unwrap();
        assert_eq!(layout.spawn_point(), Vec2::new(1.0, 2.0));
        assert_eq!(layout.player_half_extents, [0.3, 0.5]);
        assert_eq!(layout.pickups[0].size, CollectableSize::Normal);
        assert!(layout.ground.is_empty());
    }

    #[test]
    fn missing_level_file_falls_back_to_demo() {
        let layout = LevelLayout::load_from(Path::new("/nonexistent/aquanaut/level.ron"));
        assert_eq!(layout.pickups.len(), 3);
    }
}
