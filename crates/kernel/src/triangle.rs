//! Static collision geometry: immutable triangles and the terrain surface
//! that owns them.

use cubefire_common::TextureHandle;
use glam::{Vec2, Vec3};

/// Plane `a·x + b·y + c·z + d = 0` with `(a, b, c)` the unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Plane {
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        Self {
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d: -normal.dot(point),
        }
    }

    /// Signed distance of `p` from the plane, positive on the normal side.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }
}

/// Barycentric coordinates of a point relative to a triangle's vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

impl Barycentric {
    /// Whether the point lies inside the triangle or on its boundary.
    pub fn contains(&self) -> bool {
        self.v >= 0.0 && self.w >= 0.0 && self.v + self.w <= 1.0
    }
}

/// One immutable terrain triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticTriangle {
    pub vertices: [Vec3; 3],
    /// Texture coordinates, only used for drawing.
    pub uvs: [Vec2; 3],
    /// Unit normal, or zero for a degenerate triangle.
    pub normal: Vec3,
    pub plane: Plane,
    /// Number of consecutive triangles, starting at this one, drawn as one batch.
    pub group_size: u32,
    pub texture: Option<TextureHandle>,
}

impl StaticTriangle {
    pub fn new(
        vertices: [Vec3; 3],
        uvs: [Vec2; 3],
        group_size: u32,
        texture: Option<TextureHandle>,
    ) -> Self {
        let [v1, v2, v3] = vertices;
        let normal = (v1 - v3).cross(v2 - v1).normalize_or_zero();
        Self {
            vertices,
            uvs,
            normal,
            plane: Plane::from_normal_and_point(normal, v1),
            group_size,
            texture,
        }
    }

    /// Zero-area triangles have no usable normal and never collide.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    pub fn centroid(&self) -> Vec3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.plane.signed_distance(p)
    }

    /// Barycentric coordinates of `p` (assumed on the plane), or `None` when
    /// the triangle is too thin for a stable answer.
    pub fn barycentric(&self, p: Vec3) -> Option<Barycentric> {
        let [a, b, c] = self.vertices;
        let e0 = b - a;
        let e1 = c - a;
        let e2 = p - a;
        let d00 = e0.dot(e0);
        let d01 = e0.dot(e1);
        let d11 = e1.dot(e1);
        let d20 = e2.dot(e0);
        let d21 = e2.dot(e1);
        let denom = d00 * d11 - d01 * d01;
        if denom <= f32::EPSILON * d00 * d11 {
            return None;
        }
        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        Some(Barycentric {
            u: 1.0 - v - w,
            v,
            w,
        })
    }
}

/// A contiguous run of triangles sharing one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainBatch {
    pub first_triangle: usize,
    pub triangle_count: usize,
    pub texture: Option<TextureHandle>,
}

impl TerrainBatch {
    pub fn first_vertex(&self) -> u32 {
        (self.first_triangle * 3) as u32
    }

    pub fn vertex_count(&self) -> u32 {
        (self.triangle_count * 3) as u32
    }
}

/// The static collision surface. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainSurface {
    triangles: Vec<StaticTriangle>,
}

impl TerrainSurface {
    pub fn new(triangles: Vec<StaticTriangle>) -> Self {
        let degenerate = triangles.iter().filter(|t| t.is_degenerate()).count();
        if degenerate > 0 {
            tracing::warn!(degenerate, "terrain contains degenerate triangles");
        }
        Self { triangles }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn triangles(&self) -> &[StaticTriangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Draw batches in order, following each batch head's `group_size`.
    /// A zero group size counts as one triangle; batches never run past the end.
    pub fn batches(&self) -> Vec<TerrainBatch> {
        let mut batches = Vec::new();
        let mut i = 0;
        while i < self.triangles.len() {
            let head = &self.triangles[i];
            let count = (head.group_size.max(1) as usize).min(self.triangles.len() - i);
            batches.push(TerrainBatch {
                first_triangle: i,
                triangle_count: count,
                texture: head.texture,
            });
            i += count;
        }
        batches
    }

    /// Lowest and highest vertex Y, or `None` for an empty surface.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices.iter().map(|v| v.y))
            .fold(None, |range, y| match range {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }
}
