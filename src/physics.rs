//! Stepped rapier world shared between the frame loop and pending rolls.
//!
//! The world owns every rapier set and advances with a fixed timestep. Each
//! `step()` also bumps a watch channel; a pending roll subscribes its own
//! receiver, re-checks its settle condition on every wake, and detaches by
//! simply dropping the receiver. There is no global listener list to leak.

use rapier3d::prelude::*;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// How dice hold the world they are registered in.
pub type SharedWorld = Arc<Mutex<PhysicsWorld>>;

/// Fixed-step physics world with a per-step wake signal.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    integration: IntegrationParameters,
    gravity: Vector<Real>,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    steps: u64,
    step_tx: watch::Sender<u64>,
}

impl PhysicsWorld {
    /// World with standard gravity advancing `dt` seconds per step.
    pub fn new(dt: f32) -> Self {
        let (step_tx, _) = watch::channel(0);
        Self {
            pipeline: PhysicsPipeline::new(),
            integration: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            gravity: vector![0.0, -9.81, 0.0],
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            steps: 0,
            step_tx,
        }
    }

    pub fn into_shared(self) -> SharedWorld {
        Arc::new(Mutex::new(self))
    }

    pub fn dt(&self) -> f32 {
        self.integration.dt
    }

    /// Steps taken since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance the simulation one fixed step and wake settle waiters.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration,
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
        self.steps += 1;
        self.step_tx.send_replace(self.steps);
    }

    /// Subscribe to the per-step signal. The receiver observes the step
    /// counter; dropping it detaches the subscription.
    pub fn step_signal(&self) -> watch::Receiver<u64> {
        self.step_tx.subscribe()
    }

    /// Register a dynamic body with its collider; returns the body handle.
    pub fn insert_body(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Insert a static cuboid (floor slab or wall segment).
    pub fn insert_static_cuboid(
        &mut self,
        half_extents: Vector<Real>,
        position: Vector<Real>,
        restitution: f32,
        friction: f32,
    ) {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(position)
            .restitution(restitution)
            .friction(friction)
            .build();
        self.colliders.insert(collider);
    }

    /// Floor plus four walls forming the box dice are thrown into.
    ///
    /// The floor is 4x4 with its top surface at y = 0; walls are 1.5 high.
    pub fn spawn_arena(&mut self) {
        const RESTITUTION: f32 = 0.2;
        const FRICTION: f32 = 0.8;

        let wall_height = 1.5_f32;
        let wall_thickness = 0.15_f32;
        let box_size = 2.0_f32;

        self.insert_static_cuboid(
            vector![2.0, 0.15, 2.0],
            vector![0.0, -0.15, 0.0],
            RESTITUTION,
            FRICTION,
        );

        let long = vector![2.0 + wall_thickness, wall_height / 2.0, wall_thickness / 2.0];
        let short = vector![wall_thickness / 2.0, wall_height / 2.0, 2.0];
        for (position, half_extents) in [
            (vector![0.0, wall_height / 2.0, -box_size], long),
            (vector![0.0, wall_height / 2.0, box_size], long),
            (vector![-box_size, wall_height / 2.0, 0.0], short),
            (vector![box_size, wall_height / 2.0, 0.0], short),
        ] {
            self.insert_static_cuboid(half_extents, position, RESTITUTION, FRICTION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_bumps_signal() {
        let mut world = PhysicsWorld::new(1.0 / 60.0);
        let signal = world.step_signal();
        assert_eq!(*signal.borrow(), 0);

        world.step();
        world.step();
        assert_eq!(world.steps(), 2);
        assert_eq!(*signal.borrow(), 2);
    }

    #[test]
    fn test_spawn_arena_creates_floor_and_walls() {
        let mut world = PhysicsWorld::new(1.0 / 60.0);
        world.spawn_arena();
        assert_eq!(world.collider_count(), 5);
    }

    #[test]
    fn test_inserted_body_falls_under_gravity() {
        let mut world = PhysicsWorld::new(1.0 / 60.0);
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, 2.0, 0.0])
            .build();
        let collider = ColliderBuilder::ball(0.1).density(1.0).build();
        let handle = world.insert_body(body, collider);

        for _ in 0..30 {
            world.step();
        }
        let body = world.body(handle).expect("body still registered");
        assert!(
            body.translation().y < 2.0,
            "body did not fall: y = {}",
            body.translation().y
        );
    }
}
