//! Contracts with the rendering collaborator.
//!
//! The simulation core never touches a graphics API. Objects and terrain
//! describe what to draw as [`DrawCall`]s and hand them to a [`DrawSurface`].

use crate::types::{MaterialColor, MeshHandle, TextureHandle, Transform};

/// What a draw call renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// A unit mesh looked up by name at init time.
    Mesh(MeshHandle),
    /// A contiguous vertex range of the shared terrain mesh.
    TerrainRange { first_vertex: u32, vertex_count: u32 },
}

/// One draw request: geometry, model transform, color and optional texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub geometry: Geometry,
    pub transform: Transform,
    pub color: MaterialColor,
    pub texture: Option<TextureHandle>,
}

impl DrawCall {
    /// Mirrors the shader-side `hasTexture` flag.
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

/// Target that accepts draw calls for the current frame.
pub trait DrawSurface {
    fn draw(&mut self, call: &DrawCall);
}

impl DrawSurface for Vec<DrawCall> {
    fn draw(&mut self, call: &DrawCall) {
        self.push(*call);
    }
}

/// By-name mesh lookup.
pub trait MeshProvider {
    fn mesh(&self, name: &str) -> Option<MeshHandle>;

    /// Vertex count of a mesh, used for partial draws.
    fn vertex_count(&self, mesh: MeshHandle) -> Option<u32>;
}

/// By-name texture lookup.
pub trait TextureProvider {
    fn texture(&self, name: &str) -> Option<TextureHandle>;
}
