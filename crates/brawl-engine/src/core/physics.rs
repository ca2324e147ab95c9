use glam::Vec2;
use rapier2d::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::api::config::PhysicsConfig;
use crate::api::types::EntityId;
use crate::core::geometry::Rect;

/// Solver passes per step. Engine tuning, not derived from the frame delta.
pub const VELOCITY_ITERATIONS: usize = 8;
pub const POSITION_ITERATIONS: usize = 3;

/// How far below a body's feet the ground probe reaches, in pixels.
const GROUND_PROBE: f32 = 4.0;
/// Upward speed (m/s) above which a body is never considered grounded.
const GROUND_RISE_EPSILON: f32 = 0.5;

// ---------------------------------------------------------------------------
// glam <-> nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// What a physics body stands for in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRole {
    Player,
    Enemy,
    Platform,
    Wall,
}

impl BodyRole {
    /// Collision category bit of this role.
    pub fn category(self) -> Group {
        match self {
            BodyRole::Player => Group::GROUP_1,
            BodyRole::Enemy => Group::GROUP_2,
            BodyRole::Platform => Group::GROUP_3,
            BodyRole::Wall => Group::GROUP_4,
        }
    }

    /// Categories this role is physically solid against.
    /// A role's own category is never in its mask.
    pub fn mask(self) -> Group {
        let geometry = Group::GROUP_3 | Group::GROUP_4;
        match self {
            BodyRole::Player => geometry | Group::GROUP_2,
            BodyRole::Enemy => geometry | Group::GROUP_1,
            BodyRole::Platform | BodyRole::Wall => Group::GROUP_1 | Group::GROUP_2,
        }
    }

    pub fn is_static(self) -> bool {
        matches!(self, BodyRole::Platform | BodyRole::Wall)
    }

    fn groups(self) -> InteractionGroups {
        InteractionGroups::new(self.category(), self.mask())
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl ColliderMaterial {
    /// Characters do not bounce; walls are slick so bodies slide down them.
    pub fn for_role(role: BodyRole) -> Self {
        match role {
            BodyRole::Player | BodyRole::Enemy => Self {
                restitution: 0.0,
                friction: 0.5,
                density: 1.0,
            },
            BodyRole::Platform => Self::default(),
            BodyRole::Wall => Self {
                restitution: 0.0,
                friction: 0.0,
                density: 1.0,
            },
        }
    }
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Handle pair stored on an actor, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Registry entry for one physics-backed object, keyed by its owner.
#[derive(Debug, Clone, Copy)]
struct BodyRecord {
    body: PhysicsBody,
    role: BodyRole,
    /// Collider half extents in meters.
    half_extents: Vec2,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// All Rapier2D pipeline state. Absent when the world is unavailable.
struct Simulation {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl Simulation {
    fn new(gravity: Vec2) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(VELOCITY_ITERATIONS).unwrap_or(NonZeroUsize::MIN);
        integration_parameters.num_internal_pgs_iterations = POSITION_ITERATIONS;

        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn remove(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Owns the rigid-body simulation and the owner-keyed body registry.
///
/// Every public API takes and returns pixel-space values; meters stay internal.
/// When the simulation is unavailable every creation call returns `None` and
/// every query returns a neutral value, so callers fall back to moving
/// display positions directly.
pub struct PhysicsWorld {
    sim: Option<Simulation>,
    records: HashMap<EntityId, BodyRecord>,
    pixels_per_meter: f32,
}

impl PhysicsWorld {
    /// Build a world from config. An invalid or disabled config yields an
    /// unavailable world rather than an error.
    pub fn new(config: &PhysicsConfig) -> Self {
        let scale_ok = config.pixels_per_meter.is_finite() && config.pixels_per_meter > 0.0;
        let gravity_ok = config.gravity.is_finite();
        if !config.enabled || !scale_ok || !gravity_ok {
            if config.enabled {
                log::warn!(
                    "physics init failed (pixels_per_meter={}, gravity={:?}), moving directly",
                    config.pixels_per_meter,
                    config.gravity
                );
            }
            let mut world = Self::unavailable();
            if scale_ok {
                world.pixels_per_meter = config.pixels_per_meter;
            }
            return world;
        }

        Self {
            sim: Some(Simulation::new(config.gravity)),
            records: HashMap::new(),
            pixels_per_meter: config.pixels_per_meter,
        }
    }

    /// A world with no simulation behind it.
    pub fn unavailable() -> Self {
        Self {
            sim: None,
            records: HashMap::new(),
            pixels_per_meter: PhysicsConfig::default().pixels_per_meter,
        }
    }

    pub fn is_available(&self) -> bool {
        self.sim.is_some()
    }

    // -- Unit conversion --

    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    pub fn to_meters(&self, px: f32) -> f32 {
        px / self.pixels_per_meter
    }

    pub fn to_pixels(&self, m: f32) -> f32 {
        m * self.pixels_per_meter
    }

    pub fn vec_to_meters(&self, px: Vec2) -> Vec2 {
        px / self.pixels_per_meter
    }

    // -- Stepping --

    /// Advance the simulation once. The caller clamps `dt`.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        sim.step(dt);

        // Rapier keeps user forces until reset; forces here last one step.
        for record in self.records.values() {
            if record.role.is_static() {
                continue;
            }
            if let Some(rb) = sim.bodies.get_mut(record.body.body_handle) {
                rb.reset_forces(false);
            }
        }
    }

    // -- Creation / destruction --

    /// Dynamic box body for the player, centered at `center` (pixels).
    pub fn create_player_body(
        &mut self,
        center: Vec2,
        size: Vec2,
        owner: EntityId,
    ) -> Option<PhysicsBody> {
        self.create_dynamic(owner, BodyRole::Player, center, size)
    }

    /// Dynamic box body for an enemy, centered at `center` (pixels).
    pub fn create_enemy_body(
        &mut self,
        center: Vec2,
        size: Vec2,
        owner: EntityId,
    ) -> Option<PhysicsBody> {
        self.create_dynamic(owner, BodyRole::Enemy, center, size)
    }

    /// Static platform covering `rect` (pixels).
    pub fn create_platform(&mut self, rect: Rect, owner: EntityId) -> Option<PhysicsBody> {
        self.create_static(owner, BodyRole::Platform, rect)
    }

    /// Static wall covering `rect` (pixels).
    pub fn create_wall(&mut self, rect: Rect, owner: EntityId) -> Option<PhysicsBody> {
        self.create_static(owner, BodyRole::Wall, rect)
    }

    /// Remove an owner's body and record. Unknown owners are ignored.
    pub fn destroy_body(&mut self, owner: EntityId) {
        let Some(record) = self.records.remove(&owner) else {
            return;
        };
        if let Some(sim) = self.sim.as_mut() {
            sim.remove(&record.body);
        }
    }

    // -- Forces and velocities --

    /// Apply a force (Newtons) for the next step.
    pub fn apply_force(&mut self, owner: EntityId, force: Vec2) {
        if let Some(rb) = self.body_mut(owner) {
            rb.add_force(vec2_to_na(force), true);
        }
    }

    /// Apply an instantaneous impulse (N·s).
    pub fn apply_impulse(&mut self, owner: EntityId, impulse: Vec2) {
        if let Some(rb) = self.body_mut(owner) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Set linear velocity in pixels per second.
    pub fn set_body_velocity(&mut self, owner: EntityId, vel: Vec2) {
        let vel = self.vec_to_meters(vel);
        if let Some(rb) = self.body_mut(owner) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Linear velocity in pixels per second. Zero when there is no body.
    pub fn body_velocity(&self, owner: EntityId) -> Vec2 {
        self.body(owner)
            .map(|rb| na_to_vec2(rb.linvel()) * self.pixels_per_meter)
            .unwrap_or(Vec2::ZERO)
    }

    /// Body center in pixels.
    pub fn body_position(&self, owner: EntityId) -> Option<Vec2> {
        self.body(owner)
            .map(|rb| na_to_vec2(rb.translation()) * self.pixels_per_meter)
    }

    /// Teleport a body to a pixel position.
    pub fn set_body_position(&mut self, owner: EntityId, center: Vec2) {
        let pos = self.vec_to_meters(center);
        if let Some(rb) = self.body_mut(owner) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    // -- Queries --

    /// Whether the owner's body rests on a platform or wall.
    ///
    /// Derived each call: a short ray is cast down from the bottom edge of the
    /// collider, seeing only static geometry, and a rising body never counts.
    pub fn is_body_on_ground(&self, owner: EntityId) -> bool {
        let (Some(sim), Some(record)) = (self.sim.as_ref(), self.records.get(&owner)) else {
            return false;
        };
        let Some(rb) = sim.bodies.get(record.body.body_handle) else {
            return false;
        };
        if rb.linvel().y < -GROUND_RISE_EPSILON {
            return false;
        }

        let center = rb.translation();
        let skin = self.to_meters(1.0);
        let origin = point![center.x, center.y + record.half_extents.y - skin];
        let ray = Ray::new(origin, vector![0.0, 1.0]);
        let max_toi = skin + self.to_meters(GROUND_PROBE);
        let filter = QueryFilter::default()
            .exclude_rigid_body(record.body.body_handle)
            .groups(InteractionGroups::new(
                Group::GROUP_1 | Group::GROUP_2,
                Group::GROUP_3 | Group::GROUP_4,
            ));

        sim.query_pipeline
            .cast_ray(&sim.bodies, &sim.colliders, &ray, max_toi, true, filter)
            .is_some()
    }

    pub fn has_body(&self, owner: EntityId) -> bool {
        self.records.contains_key(&owner)
    }

    pub fn role_of(&self, owner: EntityId) -> Option<BodyRole> {
        self.records.get(&owner).map(|r| r.role)
    }

    /// Number of registered bodies.
    pub fn body_count(&self) -> usize {
        self.records.len()
    }

    // -- private helpers --

    fn body(&self, owner: EntityId) -> Option<&RigidBody> {
        let record = self.records.get(&owner)?;
        self.sim.as_ref()?.bodies.get(record.body.body_handle)
    }

    fn body_mut(&mut self, owner: EntityId) -> Option<&mut RigidBody> {
        let record = self.records.get(&owner)?;
        self.sim.as_mut()?.bodies.get_mut(record.body.body_handle)
    }

    fn create_dynamic(
        &mut self,
        owner: EntityId,
        role: BodyRole,
        center: Vec2,
        size: Vec2,
    ) -> Option<PhysicsBody> {
        if self.records.contains_key(&owner) {
            log::warn!("{:?} already owns a body; refusing a second {:?} body", owner, role);
            return None;
        }
        let pos = self.vec_to_meters(center);
        let half = self.vec_to_meters(size * 0.5);
        let sim = self.sim.as_mut()?;

        let rb = RigidBodyBuilder::dynamic()
            .translation(vec2_to_na(pos))
            .locked_axes(LockedAxes::ROTATION_LOCKED)
            .user_data(owner.0 as u128)
            .build();
        let body = Self::attach(sim, rb, role, half);
        self.records.insert(owner, BodyRecord { body, role, half_extents: half });
        Some(body)
    }

    fn create_static(
        &mut self,
        owner: EntityId,
        role: BodyRole,
        rect: Rect,
    ) -> Option<PhysicsBody> {
        if self.records.contains_key(&owner) {
            log::warn!("{:?} already owns a body; refusing a second {:?} body", owner, role);
            return None;
        }
        let pos = self.vec_to_meters(rect.center());
        let half = self.vec_to_meters(rect.half_extents());
        let sim = self.sim.as_mut()?;

        let rb = RigidBodyBuilder::fixed()
            .translation(vec2_to_na(pos))
            .gravity_scale(0.0)
            .user_data(owner.0 as u128)
            .build();
        let body = Self::attach(sim, rb, role, half);
        self.records.insert(owner, BodyRecord { body, role, half_extents: half });
        Some(body)
    }

    fn attach(sim: &mut Simulation, rb: RigidBody, role: BodyRole, half: Vec2) -> PhysicsBody {
        let body_handle = sim.bodies.insert(rb);
        let material = ColliderMaterial::for_role(role);
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .collision_groups(role.groups())
            .build();
        let collider_handle = sim
            .colliders
            .insert_with_parent(collider, body_handle, &mut sim.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
