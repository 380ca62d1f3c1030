use cubefire_kernel::{CameraMode, World};
use glam::Vec3;
use std::fmt::Write;

/// Camera and light placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    pub light_position: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            light_position: Vec3::new(0.0, 0.0, 15.0),
            fov_degrees: 60.0,
        }
    }
}

impl RenderView {
    /// View attached to the player according to the world's camera mode.
    /// The light sits just behind the player.
    pub fn follow(world: &World) -> Self {
        let Some(player) = world.player() else {
            return Self::default();
        };
        let Some(avatar) = player.avatar() else {
            return Self::default();
        };
        let position = player.position();
        let direction = avatar.direction;
        let (eye, target) = match world.camera_mode() {
            CameraMode::FirstPerson => (position, position + direction),
            CameraMode::ThirdPerson => (
                position - direction * world.config().player.camera_distance,
                position,
            ),
        };
        Self {
            eye,
            target,
            light_position: position - direction,
            ..Self::default()
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads world state and a view, then produces output. It never
/// mutates the world.
pub trait Renderer {
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&self, world: &World, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable dump of the frame. Used by the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== World State (tick={}, camera={:?}) ===",
            world.tick(),
            world.camera_mode()
        );
        let _ = writeln!(
            out,
            "Objects: {}  Terrain triangles: {}",
            world.object_count(),
            world.terrain().len()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z,
            view.fov_degrees
        );

        for (_, obj) in world.objects() {
            let p = obj.position();
            let _ = writeln!(
                out,
                "  {:<6} pos=({:.2}, {:.2}, {:.2}) r={:.2} |e|={:.3}",
                obj.name(),
                p.x,
                p.y,
                p.z,
                obj.radius,
                obj.energy.length()
            );
        }

        out
    }
}
