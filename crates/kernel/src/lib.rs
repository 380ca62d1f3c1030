//! Simulation kernel: game objects, collision resolution, the world tick and
//! frame pacing.
//!
//! # Invariants
//! - A tick runs its phases in a fixed order: capture previous positions,
//!   resolve dynamic pairs, apply actions and gravity, update, resolve terrain,
//!   reap.
//! - Pair resolution does not depend on the order the two objects are given.
//! - Dead objects are removed only at the end of a tick; the player never is.
//! - Terrain is immutable once the world owns it.

pub mod clock;
pub mod collision;
pub mod config;
pub mod object;
pub mod runner;
pub mod triangle;
pub mod world;

#[cfg(test)]
mod testing;

pub use clock::TickClock;
pub use collision::{PairContact, PairResponse, SurfaceContact};
pub use config::{
    BulletConfig, ConfigError, CubeGridConfig, HeightFieldConfig, Pacing, PlayerConfig,
    TerrainConfig, TriangleConfig, WorldConfig,
};
pub use object::{Avatar, Behavior, GameObject, Motion, ObjectKind, Variant};
pub use runner::{FrameReport, Simulation};
pub use triangle::{Barycentric, Plane, StaticTriangle, TerrainBatch, TerrainSurface};
pub use world::{AssetBindings, CameraMode, DespawnCause, World, WorldEvent};

pub fn crate_info() -> &'static str {
    "cubefire-kernel v0.1.0"
}
