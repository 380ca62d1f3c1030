use crate::{HeightField, TerrainError};
use cubefire_common::{TextureHandle, TextureProvider};
use cubefire_kernel::{StaticTriangle, TerrainConfig, TerrainSurface, TriangleConfig};
use glam::{Vec2, Vec3};

/// Placement of a height field in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightFieldParams {
    /// Centre of the terrain box; `center.y` is the mid height.
    pub center: Vec3,
    /// Extent of the terrain box on each axis.
    pub size: Vec3,
    /// Texture repeat count across the whole field.
    pub max_uv: Vec2,
    pub texture: Option<TextureHandle>,
}

/// Two triangles per grid cell. Cell `(i, j)` spans
/// `X ∈ [off_x + i·bx, off_x + (i+1)·bx]` and `Z ∈ [off_z + j·bz, off_z + (j+1)·bz]`.
pub fn build_from_height_field(field: &HeightField, params: &HeightFieldParams) -> TerrainSurface {
    let _span = tracing::info_span!("build_height_field").entered();
    let (w, h) = (field.width(), field.height());
    let (wf, hf) = (w as f32, h as f32);

    let box_x = params.size.x / wf;
    let box_z = params.size.z / hf;
    let off_x = params.center.x - box_x * wf / 2.0;
    let off_z = params.center.z - box_z * hf / 2.0;
    let min_y = params.center.y - params.size.y / 2.0;
    let max_y = params.center.y + params.size.y / 2.0;
    let y_at = |row: u32, col: u32| field.sample(row, col) * (max_y - min_y) + min_y;
    let uv = |i: u32, j: u32| {
        Vec2::new(
            params.max_uv.x * i as f32 / wf,
            params.max_uv.y * j as f32 / hf,
        )
    };

    let group_size = field.triangle_count() as u32;
    let mut triangles = Vec::with_capacity(field.triangle_count());
    for i in 0..h - 1 {
        for j in 0..w - 1 {
            let x1 = off_x + box_x * i as f32;
            let x2 = off_x + box_x * (i + 1) as f32;
            let z1 = off_z + box_z * j as f32;
            let z2 = off_z + box_z * (j + 1) as f32;

            let p00 = Vec3::new(x1, y_at(i, j), z1);
            let p01 = Vec3::new(x1, y_at(i, j + 1), z2);
            let p10 = Vec3::new(x2, y_at(i + 1, j), z1);
            let p11 = Vec3::new(x2, y_at(i + 1, j + 1), z2);

            triangles.push(StaticTriangle::new(
                [p00, p01, p11],
                [uv(i, j), uv(i, j + 1), uv(i + 1, j + 1)],
                group_size,
                params.texture,
            ));
            triangles.push(StaticTriangle::new(
                [p11, p10, p00],
                [uv(i + 1, j + 1), uv(i + 1, j), uv(i, j)],
                group_size,
                params.texture,
            ));
        }
    }

    tracing::info!(triangles = triangles.len(), "built height-field terrain");
    TerrainSurface::new(triangles)
}

/// Explicit triangles. Consecutive triangles with the same texture share a
/// draw batch.
pub fn build_from_triangles(
    triangles: &[TriangleConfig],
    textures: &dyn TextureProvider,
) -> TerrainSurface {
    let mut built = Vec::with_capacity(triangles.len());
    for run in triangles.chunk_by(|a, b| a.texture == b.texture) {
        let texture = run[0].texture.as_deref().and_then(|name| {
            let handle = textures.texture(name);
            if handle.is_none() {
                tracing::warn!(texture = name, "terrain texture not found");
            }
            handle
        });
        let group_size = run.len() as u32;
        built.extend(
            run.iter()
                .map(|t| StaticTriangle::new(t.vertices, t.uvs, group_size, texture)),
        );
    }
    tracing::debug!(triangles = built.len(), "built explicit terrain");
    TerrainSurface::new(built)
}

/// Build whatever terrain the config describes.
pub fn build_terrain(
    config: &TerrainConfig,
    textures: &dyn TextureProvider,
) -> Result<TerrainSurface, TerrainError> {
    match config {
        TerrainConfig::None => Ok(TerrainSurface::empty()),
        TerrainConfig::Triangles { triangles } => Ok(build_from_triangles(triangles, textures)),
        TerrainConfig::HeightField(hf) => {
            let field = HeightField::load(&hf.path)?;
            let texture = hf.texture.as_deref().and_then(|name| textures.texture(name));
            let params = HeightFieldParams {
                center: hf.center,
                size: hf.size,
                max_uv: hf.max_uv,
                texture,
            };
            Ok(build_from_height_field(&field, &params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cubefire_kernel::HeightFieldConfig;
    use image::{ImageBuffer, Luma};

    struct Textures;

    impl TextureProvider for Textures {
        fn texture(&self, name: &str) -> Option<TextureHandle> {
            match name {
                "grass" => Some(TextureHandle(1)),
                "wood" => Some(TextureHandle(2)),
                _ => None,
            }
        }
    }

    fn params() -> HeightFieldParams {
        HeightFieldParams {
            center: Vec3::new(0.0, -5.0, 0.0),
            size: Vec3::new(200.0, 20.0, 200.0),
            max_uv: Vec2::new(10.0, 10.0),
            texture: Some(TextureHandle(1)),
        }
    }

    #[test]
    fn flat_field_is_level() {
        let field = HeightField::flat(5, 4, 128.0 / 255.0).unwrap();
        let surface = build_from_height_field(&field, &params());

        assert_eq!(surface.len(), 2 * 4 * 3);
        let y = surface.triangles()[0].vertices[0].y;
        assert_relative_eq!(y, 128.0 / 255.0 * 20.0 - 15.0, epsilon = 1e-5);
        for tri in surface.triangles() {
            for v in tri.vertices {
                assert_eq!(v.y, y);
            }
            assert_relative_eq!(tri.normal.y, 1.0, epsilon = 1e-6);
        }
        assert_eq!(surface.height_range(), Some((y, y)));
    }

    #[test]
    fn height_field_is_one_batch() {
        let field = HeightField::flat(3, 3, 0.0).unwrap();
        let surface = build_from_height_field(&field, &params());
        let batches = surface.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].vertex_count(), 8 * 3);
        assert_eq!(batches[0].texture, Some(TextureHandle(1)));
    }

    #[test]
    fn grid_spans_box_around_center() {
        let field = HeightField::flat(4, 4, 1.0).unwrap();
        let p = HeightFieldParams {
            center: Vec3::new(10.0, 0.0, -20.0),
            size: Vec3::new(8.0, 2.0, 4.0),
            ..params()
        };
        let surface = build_from_height_field(&field, &p);
        let first = &surface.triangles()[0];
        // bx = 2, bz = 1, offsets put the box corner at (6, -22).
        assert_eq!(first.vertices[0], Vec3::new(6.0, 1.0, -22.0));
        assert_eq!(first.vertices[2], Vec3::new(8.0, 1.0, -21.0));
        let last = &surface.triangles()[surface.len() - 1];
        assert_eq!(last.vertices[0], Vec3::new(12.0, 1.0, -19.0));
    }

    #[test]
    fn vertices_follow_rows_and_columns() {
        // Row 1, column 0 is raised: it belongs to X2/Z1 of cell (0, 0).
        let field = HeightField::from_samples(2, 2, vec![0.0, 0.0, 1.0, 0.0]).unwrap();
        let p = HeightFieldParams {
            center: Vec3::ZERO,
            size: Vec3::new(2.0, 2.0, 2.0),
            ..params()
        };
        let surface = build_from_height_field(&field, &p);
        let second = &surface.triangles()[1];
        assert_eq!(second.vertices[1], Vec3::new(0.0, 1.0, -1.0));
        assert_eq!(surface.height_range(), Some((-1.0, 1.0)));
    }

    #[test]
    fn explicit_triangles_batch_by_texture() {
        let tri = |texture: Option<&str>| TriangleConfig {
            vertices: [Vec3::ZERO, Vec3::Z, Vec3::X],
            uvs: [Vec2::ZERO, Vec2::X, Vec2::ONE],
            texture: texture.map(str::to_string),
        };
        let surface = build_from_triangles(
            &[
                tri(Some("wood")),
                tri(Some("wood")),
                tri(Some("wood")),
                tri(Some("brick")),
                tri(None),
            ],
            &Textures,
        );
        let batches = surface.batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].triangle_count, 3);
        assert_eq!(batches[0].texture, Some(TextureHandle(2)));
        assert_eq!(batches[1].texture, None);
        assert_eq!(batches[2].first_vertex(), 12);
    }

    #[test]
    fn default_config_builds_ground_plane() {
        let surface = build_terrain(&TerrainConfig::default(), &Textures).unwrap();
        assert_eq!(surface.len(), 2);
        assert!(surface.triangles().iter().all(|t| t.normal == Vec3::Y));
        assert_eq!(surface.batches().len(), 1);
        assert!(
            build_terrain(&TerrainConfig::None, &Textures)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn builds_height_field_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        ImageBuffer::from_pixel(6, 5, Luma([128u8])).save(&path).unwrap();

        let config = TerrainConfig::HeightField(HeightFieldConfig::new(&path));
        let surface = build_terrain(&config, &Textures).unwrap();
        assert_eq!(surface.len(), 2 * 5 * 4);
        let (lo, hi) = surface.height_range().unwrap();
        assert_eq!(lo, hi);
        assert_eq!(surface.triangles()[0].texture, Some(TextureHandle(1)));
    }

    #[test]
    fn missing_height_field_is_an_error() {
        let config = TerrainConfig::HeightField(HeightFieldConfig::new("/nonexistent/height.png"));
        assert!(build_terrain(&config, &Textures).is_err());
    }
}
