use glam::Vec3;

use crate::resources::geometry::Geometry;

/// 以原点为中心的长方体（8 个顶点，12 个三角形）
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let w = width / 2.0;
    let h = height / 2.0;
    let d = depth / 2.0;

    let positions = vec![
        Vec3::new(-w, -h, d),
        Vec3::new(w, -h, d),
        Vec3::new(w, h, d),
        Vec3::new(-w, h, d),
        Vec3::new(-w, -h, -d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, h, -d),
        Vec3::new(-w, h, -d),
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2, 0, 2, 3, // front (+Z)
        5, 4, 7, 5, 7, 6, // back (-Z)
        3, 2, 6, 3, 6, 7, // top (+Y)
        4, 5, 1, 4, 1, 0, // bottom (-Y)
        1, 5, 6, 1, 6, 2, // right (+X)
        4, 0, 3, 4, 3, 7, // left (-X)
    ];

    Geometry::new(positions, indices)
}
