//! One physically simulated die.
//!
//! A [`Die`] ties together the visual model, the face marker table and a
//! rigid body registered in a shared [`PhysicsWorld`](crate::PhysicsWorld).
//! `roll()` launches a randomized throw and hands back a future that resolves
//! to the face left pointing up; `update(dt)` keeps the visual model glued to
//! the body and plays the scale-in intro.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use nalgebra::{Isometry3, Quaternion, UnitQuaternion, Vector3};
use rand::Rng;
use rapier3d::prelude::*;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::anim::{ease_out_elastic, lerp};
use crate::faces::{FaceId, FaceMap};
use crate::model::{DieModel, MeshData, Transform};
use crate::physics::SharedWorld;
use crate::tuning::RollTuning;
use crate::Error;

/// A die: visual model, face table, rigid-body proxy and roll state.
///
/// The body is created once at construction and mutated in place by every
/// roll; it is never re-registered.
pub struct Die {
    model: DieModel,
    faces: FaceMap,
    world: SharedWorld,
    body: RigidBodyHandle,
    tuning: RollTuning,
    intro_t: f32,
    rolling: Arc<AtomicBool>,
}

impl std::fmt::Debug for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Die")
            .field("body", &self.body)
            .field("tuning", &self.tuning)
            .field("intro_t", &self.intro_t)
            .field("rolling", &self.rolling.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Die {
    /// Build the rigid-body proxy from `model`'s mesh node, register it in
    /// `world`, and derive the face table.
    ///
    /// Fails with [`Error::NoMesh`] when the model carries no mesh node, or
    /// with a mesh error when the buffers cannot form collision geometry.
    pub fn new(model: DieModel, world: &SharedWorld, tuning: RollTuning) -> Result<Self, Error> {
        let mesh_id = model.mesh_node().ok_or(Error::NoMesh)?;
        let mesh = model.node(mesh_id).mesh.as_ref().ok_or(Error::NoMesh)?;

        let (vertices, triangles) =
            collision_geometry(mesh, &model.root_relative_transform(mesh_id))?;
        debug!(
            vertex_count = vertices.len(),
            triangle_count = triangles.len(),
            "building die collider"
        );

        let collider = ColliderBuilder::trimesh(vertices, triangles)
            .restitution(tuning.restitution)
            .friction(tuning.friction)
            .density(tuning.density)
            .build();
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, 0.5, 0.0])
            .ccd_enabled(true)
            .build();

        let faces = FaceMap::from_model(&model);
        let handle = {
            let mut world = world.lock().expect("physics world lock");
            world.insert_body(body, collider)
        };

        Ok(Self {
            model,
            faces,
            world: Arc::clone(world),
            body: handle,
            tuning,
            intro_t: 0.0,
            rolling: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The visual node graph, for attachment into a scene.
    pub fn model(&self) -> &DieModel {
        &self.model
    }

    pub fn faces(&self) -> &FaceMap {
        &self.faces
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    /// Whether a roll is currently awaiting settlement.
    pub fn is_rolling(&self) -> bool {
        self.rolling.load(Ordering::Acquire)
    }

    /// Face currently pointing up, read from the body's live pose.
    pub fn current_face_up(&self) -> FaceId {
        let pose = {
            let world = self.world.lock().expect("physics world lock");
            world
                .body(self.body)
                .map(|body| *body.position())
                .unwrap_or_else(Isometry3::identity)
        };
        self.faces.face_up(&pose)
    }

    /// Launch a roll.
    ///
    /// The body teleports to the drop point with zero linear velocity, a
    /// uniformly random orientation and a random spin on all three axes; the
    /// intro animation restarts. The returned future resolves to the face id
    /// once the die settles, or once the roll timeout elapses, whichever
    /// comes first — a timeout reports whatever face is up mid-motion.
    ///
    /// One roll per die may be in flight: a second call is rejected with
    /// [`Error::RollInFlight`] until the pending future completes or is
    /// dropped (dropping it cancels the wait and releases the slot).
    pub fn roll(&mut self) -> Result<impl Future<Output = FaceId> + Send + 'static, Error> {
        if self.rolling.swap(true, Ordering::AcqRel) {
            return Err(Error::RollInFlight);
        }
        let guard = RollGuard(Arc::clone(&self.rolling));

        let mut rng = rand::thread_rng();
        let orientation = random_unit_quaternion(&mut rng);
        let spin = self.tuning.spin_speed;
        let angvel = vector![
            rng.gen_range(-spin..spin),
            rng.gen_range(-spin..spin),
            rng.gen_range(-spin..spin)
        ];

        let mut steps = {
            let mut world = self.world.lock().expect("physics world lock");
            let signal = world.step_signal();
            let body = world
                .body_mut(self.body)
                .expect("die body is registered in its world");
            body.set_translation(vector![0.0, self.tuning.drop_height, 0.0], true);
            body.set_linvel(vector![0.0, 0.0, 0.0], true);
            body.set_rotation(orientation, true);
            body.set_angvel(angvel, true);
            signal
        };
        self.intro_t = 0.0;

        debug!(
            drop_height = self.tuning.drop_height as f64,
            angvel = ?angvel,
            "roll launched"
        );

        let world = Arc::clone(&self.world);
        let body = self.body;
        let faces = self.faces.clone();
        let threshold_squared = self.tuning.settle_threshold * self.tuning.settle_threshold;
        let deadline = Duration::from_secs_f32(self.tuning.roll_timeout_secs);
        let timeout_secs = self.tuning.roll_timeout_secs as f64;

        Ok(async move {
            let _guard = guard;

            let settle = async {
                loop {
                    if steps.changed().await.is_err() {
                        // World dropped; nothing further to wait on.
                        break;
                    }
                    let world = world.lock().expect("physics world lock");
                    let Some(body) = world.body(body) else {
                        break;
                    };
                    if body.linvel().norm_squared() < threshold_squared
                        && body.angvel().norm_squared() < threshold_squared
                    {
                        break;
                    }
                }
            };

            match timeout(deadline, settle).await {
                Ok(()) => debug!("die settled"),
                Err(_) => warn!(timeout_secs, "roll timed out; reporting the face mid-motion"),
            }

            let pose = {
                let world = world.lock().expect("physics world lock");
                world
                    .body(body)
                    .map(|body| *body.position())
                    .unwrap_or_else(Isometry3::identity)
            };
            faces.face_up(&pose)
        })
    }

    /// Per-frame hook: advance the intro scale animation and mirror the body
    /// pose onto the model root. Both effects run every frame whether or not
    /// a roll is pending.
    pub fn update(&mut self, dt: f32) {
        if self.intro_t < 1.0 {
            self.intro_t = (self.intro_t + dt / self.tuning.intro_duration).clamp(0.0, 1.0);
            let scale = lerp(
                self.tuning.intro_start_scale,
                self.tuning.intro_end_scale,
                ease_out_elastic(self.intro_t),
            );
            let root = self.model.root();
            self.model.node_mut(root).transform.scale = Vector3::repeat(scale);
        }

        let pose = {
            let world = self.world.lock().expect("physics world lock");
            world.body(self.body).map(|body| *body.position())
        };
        if let Some(pose) = pose {
            let root = self.model.root();
            let transform = &mut self.model.node_mut(root).transform;
            transform.translation = pose.translation.vector;
            transform.rotation = pose.rotation;
        }
    }
}

/// Clears the in-flight flag when the roll future completes or is dropped,
/// so a cancelled roll never wedges the die.
struct RollGuard(Arc<AtomicBool>);

impl Drop for RollGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Uniformly distributed random orientation (Shoemake's method). Sampling
/// Euler angles per axis would cluster orientations near the poles.
fn random_unit_quaternion(rng: &mut impl Rng) -> UnitQuaternion<f32> {
    let u1: f32 = rng.gen();
    let theta1 = rng.gen_range(0.0..std::f32::consts::TAU);
    let theta2 = rng.gen_range(0.0..std::f32::consts::TAU);
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    UnitQuaternion::from_quaternion(Quaternion::new(
        a * theta1.cos(),
        a * theta1.sin(),
        b * theta2.cos(),
        b * theta2.sin(),
    ))
}

/// Collision geometry from a mesh node's buffers, moved into body space by
/// the node's root-relative transform.
///
/// The mesh's own index buffer provides triangle connectivity when present;
/// an unindexed buffer is read as a triangle list (consecutive triples).
/// Trailing indices that do not complete a triple are dropped.
fn collision_geometry(
    mesh: &MeshData,
    transform: &Transform,
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), Error> {
    let vertices: Vec<Point<Real>> = mesh
        .positions
        .iter()
        .map(|p| {
            let q = transform.transform_point(p);
            point![q.x, q.y, q.z]
        })
        .collect();

    let triangles: Vec<[u32; 3]> = match &mesh.indices {
        Some(indices) => indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect(),
        None => {
            let triangle_count = (vertices.len() / 3) as u32;
            (0..triangle_count)
                .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
                .collect()
        }
    };

    if vertices.is_empty() || triangles.is_empty() {
        return Err(Error::EmptyMesh);
    }
    for tri in &triangles {
        for &index in tri {
            if index as usize >= vertices.len() {
                return Err(Error::IndexOutOfBounds {
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
    }
    Ok((vertices, triangles))
}
