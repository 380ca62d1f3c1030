//! Fixtures shared by the kernel's unit tests.

use crate::config::{CubeGridConfig, WorldConfig};
use crate::triangle::{StaticTriangle, TerrainSurface};
use crate::world::World;
use cubefire_common::{MeshHandle, MeshProvider, TextureHandle, TextureProvider};
use glam::{Vec2, Vec3};

/// Provides every built-in mesh and the brick texture.
pub struct Catalog;

impl MeshProvider for Catalog {
    fn mesh(&self, name: &str) -> Option<MeshHandle> {
        match name {
            "bunny" => Some(MeshHandle(0)),
            "cube" => Some(MeshHandle(1)),
            "sphere" => Some(MeshHandle(2)),
            _ => None,
        }
    }

    fn vertex_count(&self, mesh: MeshHandle) -> Option<u32> {
        Some(36 * (mesh.0 + 1))
    }
}

impl TextureProvider for Catalog {
    fn texture(&self, name: &str) -> Option<TextureHandle> {
        (name == "brick").then_some(TextureHandle(7))
    }
}

/// No gravity and no cubes: only the player and what a test spawns.
pub fn quiet_config() -> WorldConfig {
    WorldConfig {
        gravity: 0.0,
        cubes: CubeGridConfig {
            rows: 0,
            ..CubeGridConfig::default()
        },
        ..WorldConfig::default()
    }
}

pub fn world_with(config: WorldConfig, terrain: TerrainSurface) -> World {
    World::new(config, terrain, &Catalog, &Catalog).unwrap()
}

/// The default 50×50 ground plane at `y = 0`, facing up.
pub fn floor() -> TerrainSurface {
    let uvs = [Vec2::ZERO; 3];
    TerrainSurface::new(vec![
        StaticTriangle::new(
            [
                Vec3::new(25.0, 0.0, -25.0),
                Vec3::new(-25.0, 0.0, -25.0),
                Vec3::new(25.0, 0.0, 25.0),
            ],
            uvs,
            2,
            None,
        ),
        StaticTriangle::new(
            [
                Vec3::new(-25.0, 0.0, -25.0),
                Vec3::new(-25.0, 0.0, 25.0),
                Vec3::new(25.0, 0.0, 25.0),
            ],
            uvs,
            2,
            None,
        ),
    ])
}
