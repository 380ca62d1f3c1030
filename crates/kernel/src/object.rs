//! Game objects: the player avatar, cubes and bullets.
//!
//! Variants share one [`GameObject`] record; what differs between them is
//! data ([`Motion`] constants, asset names) plus the player's [`Avatar`].

use cubefire_common::{
    DrawCall, DrawSurface, Geometry, MaterialColor, MeshHandle, MeshProvider, TextureHandle,
    TextureProvider, Transform,
};
use cubefire_input::MoveDirection;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Variant discriminator used for collision dispatch.
///
/// The declaration order is the canonical pair order: it matches the
/// lexicographic order of the display names ("Player" < "bullet" < "cube").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    Player,
    Bullet,
    Cube,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Player, ObjectKind::Bullet, ObjectKind::Cube];

    pub fn name(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Bullet => "bullet",
            Self::Cube => "cube",
        }
    }

    pub fn mesh_name(self) -> &'static str {
        match self {
            Self::Player => "bunny",
            Self::Bullet => "sphere",
            Self::Cube => "cube",
        }
    }

    pub fn texture_name(self) -> Option<&'static str> {
        match self {
            Self::Cube => Some("brick"),
            Self::Player | Self::Bullet => None,
        }
    }

    pub fn motion(self) -> Motion {
        match self {
            Self::Player | Self::Cube => Motion::DRIFT,
            Self::Bullet => Motion::PROJECTILE,
        }
    }
}

/// Per-variant integration constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Fraction of `energy` added to the position each tick.
    pub step_scale: f32,
    /// `energy` is divided by this after every step. Always > 1.
    pub damping: f32,
    /// When set, radius and scale follow `|energy| * shrink`.
    pub shrink: Option<f32>,
    /// When set, the object dies once `|energy|` drops below this.
    pub expiry: Option<f32>,
}

impl Motion {
    pub const DRIFT: Self = Self {
        step_scale: 1.0,
        damping: 1.2,
        shrink: None,
        expiry: None,
    };

    pub const PROJECTILE: Self = Self {
        step_scale: 0.3,
        damping: 1.1,
        shrink: Some(0.3),
        expiry: Some(0.1),
    };
}

/// Player-only state: where it faces and how hard movement pushes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    /// Unit facing direction.
    pub direction: Vec3,
    pub speed: f32,
}

/// Polar angle limits keep the look direction off the poles.
const PITCH_LIMIT: f32 = 0.01;

impl Avatar {
    pub fn new(speed: f32) -> Self {
        Self {
            direction: Vec3::NEG_Z,
            speed,
        }
    }

    /// Energy impulse for one tick of movement. Always horizontal.
    pub fn thrust(&self, towards: MoveDirection) -> Vec3 {
        let d = self.direction * self.speed;
        match towards {
            MoveDirection::Forward => Vec3::new(d.x, 0.0, d.z),
            MoveDirection::Back => Vec3::new(-d.x, 0.0, -d.z),
            MoveDirection::Left => Vec3::new(d.z, 0.0, -d.x),
            MoveDirection::Right => Vec3::new(-d.z, 0.0, d.x),
        }
    }

    /// Yaw by `angle` radians, keeping the current pitch.
    pub fn turn(&mut self, angle: f32) {
        let horizontal = Vec2::new(self.direction.x, self.direction.z).length();
        let phi = self.direction.z.atan2(self.direction.x) + angle;
        self.direction.x = horizontal * phi.cos();
        self.direction.z = horizontal * phi.sin();
    }

    /// Apply pointer motion: x changes yaw, y changes pitch.
    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        let phi = self.direction.z.atan2(self.direction.x) + delta.x * sensitivity;
        let theta = (self.direction.y.clamp(-1.0, 1.0).acos() + delta.y * sensitivity)
            .clamp(PITCH_LIMIT, PI - PITCH_LIMIT);
        self.direction = Vec3::new(
            theta.sin() * phi.cos(),
            theta.cos(),
            theta.sin() * phi.sin(),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variant {
    Player(Avatar),
    Cube,
    Bullet,
}

/// A dynamic object owned by the world.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub variant: Variant,
    pub transform: Transform,
    /// Position at the start of the current tick.
    pub previous_position: Vec3,
    /// Velocity/impulse accumulator. Decays every tick.
    pub energy: Vec3,
    /// Bounding-sphere radius used by every collision test.
    pub radius: f32,
    pub color: MaterialColor,
    pub mesh: Option<MeshHandle>,
    pub texture: Option<TextureHandle>,
    pub alive: bool,
}

impl GameObject {
    fn with_variant(variant: Variant, position: Vec3) -> Self {
        Self {
            variant,
            transform: Transform::from_position(position),
            previous_position: position,
            energy: Vec3::ZERO,
            radius: 1.0,
            color: MaterialColor::WHITE,
            mesh: None,
            texture: None,
            alive: true,
        }
    }

    pub fn player(position: Vec3, speed: f32) -> Self {
        Self::with_variant(Variant::Player(Avatar::new(speed)), position)
    }

    pub fn cube(position: Vec3, scale: f32, color: MaterialColor) -> Self {
        let mut cube = Self::with_variant(Variant::Cube, position);
        cube.transform.scale = Vec3::splat(scale);
        cube.radius = cube_radius(scale);
        cube.color = color;
        cube
    }

    pub fn bullet(position: Vec3, energy: Vec3) -> Self {
        let mut bullet = Self::with_variant(Variant::Bullet, position);
        bullet.transform.scale = Vec3::splat(0.5);
        bullet.radius = 0.5;
        bullet.energy = energy;
        bullet
    }

    pub fn kind(&self) -> ObjectKind {
        match self.variant {
            Variant::Player(_) => ObjectKind::Player,
            Variant::Cube => ObjectKind::Cube,
            Variant::Bullet => ObjectKind::Bullet,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn avatar(&self) -> Option<&Avatar> {
        match &self.variant {
            Variant::Player(avatar) => Some(avatar),
            _ => None,
        }
    }

    pub fn avatar_mut(&mut self) -> Option<&mut Avatar> {
        match &mut self.variant {
            Variant::Player(avatar) => Some(avatar),
            _ => None,
        }
    }
}

/// Half the diagonal of a cube scaled uniformly by `scale`.
pub fn cube_radius(scale: f32) -> f32 {
    0.5 * (3.0 * scale * scale).sqrt()
}

/// Capabilities every object variant provides to the world.
pub trait Behavior {
    /// One-time setup when the object enters the world.
    fn init(&mut self, meshes: &dyn MeshProvider, textures: &dyn TextureProvider);
    /// Emit draw calls for the current transform.
    fn render(&self, surface: &mut dyn DrawSurface);
    /// Per-tick integration; depends only on the object's own state.
    fn update(&mut self);
}

impl Behavior for GameObject {
    fn init(&mut self, meshes: &dyn MeshProvider, textures: &dyn TextureProvider) {
        let kind = self.kind();
        self.mesh = meshes.mesh(kind.mesh_name());
        if self.mesh.is_none() {
            tracing::warn!(mesh = kind.mesh_name(), object = kind.name(), "mesh not found");
        }
        if let Some(texture) = kind.texture_name() {
            self.texture = textures.texture(texture);
            if self.texture.is_none() {
                tracing::warn!(texture, object = kind.name(), "texture not found");
            }
        }
        if kind == ObjectKind::Player {
            self.transform.scale = Vec3::splat(0.1);
            self.radius = 0.1;
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        let Some(mesh) = self.mesh else {
            return;
        };
        surface.draw(&DrawCall {
            geometry: Geometry::Mesh(mesh),
            transform: self.transform,
            color: self.color,
            texture: self.texture,
        });
    }

    fn update(&mut self) {
        let motion = self.kind().motion();
        self.transform.position += self.energy * motion.step_scale;
        self.energy /= motion.damping;

        let magnitude = self.energy.length();
        if let Some(shrink) = motion.shrink {
            self.radius = magnitude * shrink;
            self.transform.scale = Vec3::splat(self.radius);
        }
        if let Some(threshold) = motion.expiry {
            if magnitude < threshold {
                self.alive = false;
            }
        }
    }
}
