use cubefire_common::{DrawCall, DrawSurface, Geometry, MaterialColor, Transform};
use cubefire_kernel::World;

/// Counts for one drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub object_calls: usize,
    pub terrain_calls: usize,
    pub terrain_vertices: u32,
}

struct Counting<'a> {
    inner: &'a mut dyn DrawSurface,
    calls: usize,
}

impl DrawSurface for Counting<'_> {
    fn draw(&mut self, call: &DrawCall) {
        self.calls += 1;
        self.inner.draw(call);
    }
}

/// Draw every live object, then one call per terrain batch.
pub fn draw_frame(world: &World, surface: &mut dyn DrawSurface) -> FrameStats {
    let mut counting = Counting {
        inner: surface,
        calls: 0,
    };
    world.render_objects(&mut counting);
    let mut stats = FrameStats {
        object_calls: counting.calls,
        ..FrameStats::default()
    };

    for batch in world.terrain().batches() {
        let call = DrawCall {
            geometry: Geometry::TerrainRange {
                first_vertex: batch.first_vertex(),
                vertex_count: batch.vertex_count(),
            },
            transform: Transform::default(),
            color: MaterialColor::WHITE,
            texture: batch.texture,
        };
        counting.inner.draw(&call);
        stats.terrain_calls += 1;
        stats.terrain_vertices += batch.vertex_count();
    }

    tracing::trace!(
        objects = stats.object_calls,
        terrain = stats.terrain_calls,
        "frame drawn"
    );
    stats
}

/// Draw surface that keeps the calls of the current frame plus running totals.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    frames: u64,
    total_calls: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame's calls.
    pub fn begin_frame(&mut self) {
        self.calls.clear();
        self.frames += 1;
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn textured_calls(&self) -> usize {
        self.calls.iter().filter(|c| c.has_texture()).count()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn total_calls(&self) -> u64 {
        self.total_calls
    }
}

impl DrawSurface for RecordingSurface {
    fn draw(&mut self, call: &DrawCall) {
        self.calls.push(*call);
        self.total_calls += 1;
    }
}
