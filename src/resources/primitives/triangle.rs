use glam::Vec2;

use crate::resources::geometry::Geometry;

/// XY 平面上的单个三角形
#[must_use]
pub fn create_triangle(a: Vec2, b: Vec2, c: Vec2) -> Geometry {
    Geometry::new(
        vec![a.extend(0.0), b.extend(0.0), c.extend(0.0)],
        vec![0, 1, 2],
    )
}
