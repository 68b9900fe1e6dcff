//! Physics world management with Rapier2D.

use crate::collision::{CollisionGroup, PhysicsBody};
use crate::events::{ContactEvent, ContactEventCollector};
use crate::hooks::ContactFilter;
use engine_core::{Bounds, Tag};
use glam::Vec2;
use rapier2d::prelude::*;

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
    contact_filter: ContactFilter,
    contact_events: ContactEventCollector,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            contact_filter: ContactFilter::new(),
            contact_events: ContactEventCollector::new(),
        }
    }

    /// Set the duration of one `step`, in seconds.
    pub fn set_timestep(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Step the physics simulation.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.contact_filter,
            &self.contact_events,
        );
    }

    /// Update query pipeline for overlap queries without stepping.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Contact transitions raised since the last drain, in arrival order.
    pub fn drain_contact_events(&mut self) -> Vec<ContactEvent> {
        self.contact_events.drain()
    }

    /// Add the player character: a rotation-locked dynamic box that reports
    /// contacts and runs the contact filter.
    pub fn add_character(&mut self, position: Vec2, half_extents: Vec2) -> PhysicsBody {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .lock_rotations()
            .ccd_enabled(true)
            .build();
        let body = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .friction(0.0)
            .collision_groups(CollisionGroup::interaction(CollisionGroup::player()))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS)
            .user_data(Tag::Player.to_user_data())
            .build();
        let collider = self
            .collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set);
        PhysicsBody::new(body, collider)
    }

    /// Add a static box of level geometry. No parent body; collider is fixed in world.
    pub fn add_ground_box(&mut self, center: Vec2, half_extents: Vec2) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![center.x, center.y])
            .collision_groups(CollisionGroup::interaction(CollisionGroup::ground()))
            .user_data(Tag::Ground.to_user_data())
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a one-way platform.
    pub fn add_bridge(&mut self, center: Vec2, half_extents: Vec2) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![center.x, center.y])
            .collision_groups(CollisionGroup::interaction(CollisionGroup::bridge()))
            .user_data(Tag::Bridge.to_user_data())
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a water trigger volume.
    pub fn add_water_volume(&mut self, center: Vec2, half_extents: Vec2) -> ColliderHandle {
        self.add_sensor_box(center, half_extents, CollisionGroup::water(), Tag::Water)
    }

    /// Add a pickup trigger.
    pub fn add_pickup(&mut self, center: Vec2, radius: f32) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .translation(vector![center.x, center.y])
            .sensor(true)
            .collision_groups(CollisionGroup::interaction(CollisionGroup::pickup()))
            .user_data(Tag::Collectable.to_user_data())
            .build();
        self.collider_set.insert(collider)
    }

    fn add_sensor_box(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        groups: (Group, Group),
        tag: Tag,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![center.x, center.y])
            .sensor(true)
            .collision_groups(CollisionGroup::interaction(groups))
            .user_data(tag.to_user_data())
            .build();
        self.collider_set.insert(collider)
    }

    /// Remove a collider by its handle.
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        log::debug!("Removing collider {:?}", handle);
        self.contact_filter.forget(handle);
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true,
        );
    }

    /// Category stored on a collider; `Untagged` if the collider is gone.
    pub fn collider_tag(&self, handle: ColliderHandle) -> Tag {
        self.collider_set
            .get(handle)
            .map(|c| Tag::from_user_data(c.user_data))
            .unwrap_or_default()
    }

    /// World-space bounds of a collider.
    pub fn collider_bounds(&self, handle: ColliderHandle) -> Option<Bounds> {
        self.collider_set.get(handle).map(|c| {
            let aabb = c.compute_aabb();
            Bounds::new(
                Vec2::new(aabb.mins.x, aabb.mins.y),
                Vec2::new(aabb.maxs.x, aabb.maxs.y),
            )
        })
    }

    pub fn has_body(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    pub fn has_collider(&self, handle: ColliderHandle) -> bool {
        self.collider_set.contains(handle)
    }

    /// Get the position of a rigid body.
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            Vec2::new(pos.x, pos.y)
        })
    }

    /// Teleport a body.
    pub fn set_body_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let v = body.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    pub fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    /// Suppress (or restore) contacts between two specific colliders.
    pub fn set_collision_ignored(&mut self, a: ColliderHandle, b: ColliderHandle, ignored: bool) {
        self.contact_filter.set_ignored(a, b, ignored);
    }

    pub fn is_collision_ignored(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        self.contact_filter.is_ignored(a, b)
    }

    pub fn contact_filter(&self) -> &ContactFilter {
        &self.contact_filter
    }
}
