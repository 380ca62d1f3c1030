use glam::Vec3;
use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Stable handle of a dynamic object inside the world's arena.
    ///
    /// Handles of despawned objects are never reused for a different object.
    pub struct ObjectId;
}

/// Opaque handle to a drawable mesh owned by the mesh provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

/// Opaque handle to a bindable texture owned by the texture provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// World-space transform: position, Euler rotation in degrees (X, then Y,
/// then Z), and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Render-only RGB color. Channels are expected in `[0, 1]`; this is a
/// contract with the renderer and is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialColor(pub Vec3);

impl MaterialColor {
    pub const WHITE: Self = Self(Vec3::ONE);

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self(Vec3::new(r, g, b))
    }

    /// Whether every channel lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        self.0.cmpge(Vec3::ZERO).all() && self.0.cmple(Vec3::ONE).all()
    }
}

impl Default for MaterialColor {
    fn default() -> Self {
        Self::WHITE
    }
}
