//! Asset registry: meshes and textures looked up by name.
//!
//! The simulation never loads files itself. Whatever owns the GPU resources
//! registers them here under a name and the world binds handles through the
//! [`MeshProvider`] and [`TextureProvider`] contracts.
//!
//! # Invariants
//! - Handles are dense and assigned in registration order.
//! - Registering a name twice keeps the first handle.

use cubefire_common::{MeshHandle, MeshProvider, TextureHandle, TextureProvider};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A registered mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshInfo {
    pub name: String,
    pub vertex_count: u32,
}

/// By-name registry of meshes and textures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetStore {
    meshes: Vec<MeshInfo>,
    mesh_names: BTreeMap<String, MeshHandle>,
    textures: Vec<String>,
    texture_names: BTreeMap<String, TextureHandle>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock meshes (cube, sphere, bunny) and textures (brick, grass,
    /// wood). Vertex counts describe the unit meshes a renderer would upload.
    pub fn builtin() -> Self {
        let mut store = Self::new();
        store.register_mesh("cube", 36);
        store.register_mesh("sphere", 1536);
        store.register_mesh("bunny", 1536);
        for name in ["brick", "grass", "wood"] {
            store.register_texture(name);
        }
        store
    }

    /// Register a mesh and return its handle.
    pub fn register_mesh(&mut self, name: &str, vertex_count: u32) -> MeshHandle {
        if let Some(handle) = self.mesh_names.get(name) {
            tracing::debug!(name, "mesh already registered");
            return *handle;
        }
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(MeshInfo {
            name: name.to_string(),
            vertex_count,
        });
        self.mesh_names.insert(name.to_string(), handle);
        handle
    }

    /// Register a texture and return its handle.
    pub fn register_texture(&mut self, name: &str) -> TextureHandle {
        if let Some(handle) = self.texture_names.get(name) {
            tracing::debug!(name, "texture already registered");
            return *handle;
        }
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(name.to_string());
        self.texture_names.insert(name.to_string(), handle);
        handle
    }

    pub fn mesh_info(&self, handle: MeshHandle) -> Option<&MeshInfo> {
        self.meshes.get(handle.0 as usize)
    }

    pub fn texture_name(&self, handle: TextureHandle) -> Option<&str> {
        self.textures.get(handle.0 as usize).map(String::as_str)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl MeshProvider for AssetStore {
    fn mesh(&self, name: &str) -> Option<MeshHandle> {
        self.mesh_names.get(name).copied()
    }

    fn vertex_count(&self, mesh: MeshHandle) -> Option<u32> {
        self.mesh_info(mesh).map(|m| m.vertex_count)
    }
}

impl TextureProvider for AssetStore {
    fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.texture_names.get(name).copied()
    }
}

pub fn crate_info() -> &'static str {
    "cubefire-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_mesh() {
        let mut store = AssetStore::new();
        let id = store.register_mesh("cube", 36);
        assert_eq!(store.mesh("cube"), Some(id));
        assert_eq!(store.vertex_count(id), Some(36));
        assert_eq!(store.mesh_count(), 1);
    }

    #[test]
    fn register_is_idempotent() {
        let mut store = AssetStore::new();
        let first = store.register_texture("brick");
        let second = store.register_texture("brick");
        assert_eq!(first, second);
        assert_eq!(store.texture_count(), 1);
        assert_eq!(store.register_mesh("cube", 36), store.register_mesh("cube", 99));
        assert_eq!(store.vertex_count(MeshHandle(0)), Some(36));
    }

    #[test]
    fn missing_names_are_none() {
        let store = AssetStore::builtin();
        assert!(store.mesh("teapot").is_none());
        assert!(store.texture("marble").is_none());
        assert!(store.vertex_count(MeshHandle(99)).is_none());
    }

    #[test]
    fn builtin_covers_every_object_and_terrain_asset() {
        let store = AssetStore::builtin();
        for mesh in ["cube", "sphere", "bunny"] {
            assert!(store.mesh(mesh).is_some(), "{mesh}");
        }
        for texture in ["brick", "grass", "wood"] {
            let handle = store.texture(texture).unwrap();
            assert_eq!(store.texture_name(handle), Some(texture));
        }
    }
}
