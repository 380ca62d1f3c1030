//! Terrain: turns a height-field image or an explicit triangle list into the
//! kernel's static collision surface.
//!
//! # Invariants
//! - Built once before the world starts; the result is never mutated.
//! - A height field yields exactly two triangles per grid cell, all in one
//!   draw batch.

mod builder;
mod heightfield;

pub use builder::{HeightFieldParams, build_from_height_field, build_from_triangles, build_terrain};
pub use heightfield::HeightField;

/// Errors raised while building terrain.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("height field too small: {width}x{height}, need at least 2x2")]
    TooSmall { width: u32, height: u32 },
    #[error("height field {width}x{height} needs {expected} samples, got {actual}")]
    SampleCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub fn crate_info() -> &'static str {
    "cubefire-terrain v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("terrain"));
    }
}
