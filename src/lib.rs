//! Physics-based die rolling.
//!
//! A [`Die`] owns a visual node graph ([`DieModel`]), a rigid-body proxy
//! registered into a shared stepped world ([`PhysicsWorld`]), and the table
//! mapping `FACE_*` marker nodes to face values ([`FaceMap`]). Rolling drops
//! the body from a fixed point with a uniformly random orientation and a
//! randomized spin, then waits for the simulation to settle (or for a
//! wall-clock timeout) before reporting the face pointing up.
//!
//! The world is stepped externally at a fixed cadence; each step wakes any
//! pending roll so it can re-check the settle condition. `Die::update`
//! mirrors the body pose onto the visual model every frame and plays a short
//! scale-in animation whenever a roll starts.
//!
//! ```no_run
//! use tumble::{Die, DieKind, PhysicsWorld, RollTuning};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tumble::Error> {
//! const DT: f32 = 1.0 / 60.0;
//! let world = PhysicsWorld::new(DT).into_shared();
//! world.lock().unwrap().spawn_arena();
//!
//! let mut die = Die::new(DieKind::D6.model(), &world, RollTuning::default())?;
//! let pending = die.roll()?;
//! let result = tokio::spawn(pending);
//! while !result.is_finished() {
//!     world.lock().unwrap().step();
//!     die.update(DT);
//!     tokio::task::yield_now().await;
//! }
//! println!("rolled a {}", result.await.unwrap());
//! # Ok(())
//! # }
//! ```

pub mod anim;
pub mod die;
pub mod faces;
pub mod model;
pub mod physics;
pub mod shapes;
pub mod tuning;

pub use die::Die;
pub use faces::{FaceId, FaceMap, FaceMarker};
pub use model::{DieModel, MeshData, Node, NodeId, Transform};
pub use physics::{PhysicsWorld, SharedWorld};
pub use shapes::DieKind;
pub use tuning::RollTuning;

use thiserror::Error;

/// Errors raised while building a die or launching a roll.
#[derive(Debug, Error)]
pub enum Error {
    /// The model contains no mesh node, so no collision shape can be built.
    #[error("model contains no mesh node")]
    NoMesh,

    /// The mesh node's buffers describe zero triangles.
    #[error("mesh node has no usable triangles")]
    EmptyMesh,

    /// The mesh index buffer points outside its vertex buffer.
    #[error("mesh index {index} is out of bounds ({vertex_count} vertices)")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    /// A roll was requested while a previous one is still pending.
    #[error("a roll is already in flight for this die")]
    RollInFlight,

    /// A tuning file could not be read.
    #[error("failed to read tuning file")]
    Io(#[from] std::io::Error),

    /// A tuning file could not be parsed.
    #[error("failed to parse tuning file")]
    Tuning(#[from] ron::error::SpannedError),
}
