use crate::object::GameObject;
use crate::triangle::{StaticTriangle, TerrainSurface};
use glam::Vec3;

/// A bounce off one static triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContact {
    /// Index of the triangle within its surface.
    pub triangle: usize,
    /// How far the object was pushed out along the normal.
    pub penetration: f32,
    pub normal: Vec3,
}

/// Test one object against one triangle and bounce it if they touch.
///
/// Returns the push distance along the triangle normal, or `None` when the
/// object neither crossed the plane this tick nor sits within its radius of
/// it, or when the contact point falls outside the triangle. Contacts that
/// only touch an edge or vertex region are not detected.
pub fn resolve_triangle(obj: &mut GameObject, tri: &StaticTriangle) -> Option<f32> {
    if tri.is_degenerate() {
        return None;
    }
    let curr = tri.signed_distance(obj.position());
    let prev = tri.signed_distance(obj.previous_position);
    let crossed = curr * prev < 0.0;
    let touching = curr.abs() < obj.radius;
    if !crossed && !touching {
        return None;
    }

    let n = tri.normal;
    let mut p = obj.position() - n * curr;
    p += (tri.centroid() - p).normalize_or_zero() * obj.radius;
    if !tri.barycentric(p)?.contains() {
        return None;
    }

    let push = obj.radius - curr;
    obj.transform.position += n * push;
    obj.energy -= n * (2.0 * n.dot(obj.energy));
    Some(push)
}

/// Run one object against every triangle of the surface, in order.
pub fn resolve_surface(obj: &mut GameObject, surface: &TerrainSurface) -> Vec<SurfaceContact> {
    surface
        .triangles()
        .iter()
        .enumerate()
        .filter_map(|(index, tri)| {
            resolve_triangle(obj, tri).map(|penetration| SurfaceContact {
                triangle: index,
                penetration,
                normal: tri.normal,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cubefire_common::MaterialColor;
    use glam::Vec2;

    fn floor() -> StaticTriangle {
        StaticTriangle::new(
            [
                Vec3::new(-10.0, 0.0, -10.0),
                Vec3::new(-10.0, 0.0, 10.0),
                Vec3::new(10.0, 0.0, 10.0),
            ],
            [Vec2::ZERO; 3],
            1,
            None,
        )
    }

    fn ball(position: Vec3, previous: Vec3, energy: Vec3) -> GameObject {
        let mut obj = GameObject::cube(position, 0.3, MaterialColor::WHITE);
        obj.radius = 0.1;
        obj.previous_position = previous;
        obj.energy = energy;
        obj
    }

    #[test]
    fn bounce_flips_normal_energy() {
        let mut obj = ball(
            Vec3::new(-5.0, 0.05, 5.0),
            Vec3::new(-5.0, 0.3, 5.0),
            Vec3::new(0.2, -0.5, 0.0),
        );
        let before = obj.energy.length();
        let push = resolve_triangle(&mut obj, &floor()).unwrap();

        assert_relative_eq!(push, 0.05, epsilon = 1e-6);
        assert_relative_eq!(obj.position().y, 0.1, epsilon = 1e-6);
        assert_relative_eq!(obj.energy.y, 0.5, epsilon = 1e-6);
        assert_relative_eq!(obj.energy.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(obj.energy.length(), before, epsilon = 1e-6);
    }

    #[test]
    fn crossing_the_plane_is_caught() {
        let mut obj = ball(
            Vec3::new(-5.0, -0.3, 5.0),
            Vec3::new(-5.0, 0.5, 5.0),
            Vec3::new(0.0, -0.8, 0.0),
        );
        assert!(resolve_triangle(&mut obj, &floor()).is_some());
        assert_relative_eq!(obj.position().y, 0.1, epsilon = 1e-6);
        assert_relative_eq!(obj.energy.y, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn crossing_uses_full_previous_position() {
        // Only the previous position puts the object above the plane of a
        // tilted triangle; the current z alone would not.
        let tilted = StaticTriangle::new(
            [
                Vec3::new(-10.0, -10.0, -10.0),
                Vec3::new(-10.0, 10.0, 10.0),
                Vec3::new(10.0, 10.0, 10.0),
            ],
            [Vec2::ZERO; 3],
            1,
            None,
        );
        let mut obj = ball(
            Vec3::new(-5.0, 4.0, 5.5),
            Vec3::new(-5.0, 4.0, 2.0),
            Vec3::ZERO,
        );
        assert!(tilted.signed_distance(obj.previous_position) > 0.0);
        assert!(tilted.signed_distance(obj.position()) < -obj.radius);
        assert!(resolve_triangle(&mut obj, &tilted).is_some());
        assert_relative_eq!(
            tilted.signed_distance(obj.position()),
            obj.radius,
            epsilon = 1e-5
        );
    }

    #[test]
    fn far_above_plane_is_ignored() {
        let mut obj = ball(Vec3::new(-5.0, 2.0, 5.0), Vec3::new(-5.0, 2.5, 5.0), -Vec3::Y);
        let before = obj.clone();
        assert!(resolve_triangle(&mut obj, &floor()).is_none());
        assert_eq!(obj, before);
    }

    #[test]
    fn outside_footprint_is_ignored() {
        let mut obj = ball(Vec3::new(5.0, 0.05, -5.0), Vec3::new(5.0, 0.3, -5.0), -Vec3::Y);
        assert!(resolve_triangle(&mut obj, &floor()).is_none());
        assert_relative_eq!(obj.position().y, 0.05);
    }

    #[test]
    fn degenerate_triangle_never_collides() {
        let flat = StaticTriangle::new([Vec3::ZERO, Vec3::X, Vec3::X * 2.0], [Vec2::ZERO; 3], 1, None);
        let mut obj = ball(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.5, 0.2, 0.0), -Vec3::Y);
        assert!(resolve_triangle(&mut obj, &flat).is_none());
        assert!(!obj.position().is_nan());
        assert!(!obj.energy.is_nan());
    }

    #[test]
    fn surface_reports_each_contact() {
        let other_half = StaticTriangle::new(
            [
                Vec3::new(-10.0, 0.0, -10.0),
                Vec3::new(10.0, 0.0, 10.0),
                Vec3::new(10.0, 0.0, -10.0),
            ],
            [Vec2::ZERO; 3],
            1,
            None,
        );
        let surface = TerrainSurface::new(vec![floor(), other_half]);

        let mut obj = ball(
            Vec3::new(5.0, 0.05, -5.0),
            Vec3::new(5.0, 0.3, -5.0),
            Vec3::new(0.0, -0.2, 0.0),
        );
        let contacts = resolve_surface(&mut obj, &surface);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].triangle, 1);
        assert_eq!(contacts[0].normal, Vec3::Y);
        assert_relative_eq!(obj.position().y, 0.1, epsilon = 1e-6);
    }
}
