//! Exclusive wrapper around the rapier2d world.
//!
//! One `PhysicsWorld` exists per Active lifetime and is never reused across
//! activations. All coordinates are logical pixels, y-down, so "downward"
//! gravity is positive y. No events are wired up: body removal is silent by
//! construction and can never recurse into further world mutation.

use glam::Vec2;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

/// Downward gravity magnitude. Deliberately far below realistic fall speed;
/// the boards should drift, not drop.
pub const GRAVITY: f32 = 0.5;

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            gravity: vector![0.0, GRAVITY],
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Insert a body with one attached collider.
    pub fn insert(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Remove a body and its attached colliders. Silent: no removal events.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Remove every body in the world.
    pub fn clear(&mut self) {
        let handles: Vec<RigidBodyHandle> = self.bodies.iter().map(|(h, _)| h).collect();
        for handle in handles {
            self.remove_body(handle);
        }
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Logical-pixel position of a body's center.
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies
            .get(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    /// Rotation of a body in radians.
    pub fn body_rotation(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|body| body.rotation().angle())
    }

    /// Topmost dynamic body containing the given point, if any.
    ///
    /// Linear scan over the collider set; the world holds at most a few
    /// dozen colliders.
    pub fn pick_body_at(&self, point: Vec2) -> Option<RigidBodyHandle> {
        let pt = point![point.x, point.y];
        for (_, collider) in self.colliders.iter() {
            let Some(parent) = collider.parent() else {
                continue;
            };
            let Some(body) = self.bodies.get(parent) else {
                continue;
            };
            if !body.is_dynamic() {
                continue;
            }
            if collider.shape().contains_point(collider.position(), &pt) {
                return Some(parent);
            }
        }
        None
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
