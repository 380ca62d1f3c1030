//! Shared value types and the boundary contracts between the simulation core
//! and its external collaborators (renderer, mesh and texture providers).
//!
//! # Invariants
//! - Nothing in this crate owns simulation state.
//! - Asset handles are opaque; a missing asset is `None`, never an error.

pub mod surface;
pub mod types;

pub use surface::{DrawCall, DrawSurface, Geometry, MeshProvider, TextureProvider};
pub use types::{MaterialColor, MeshHandle, ObjectId, TextureHandle, Transform};

pub fn crate_info() -> &'static str {
    "cubefire-common v0.1.0"
}
