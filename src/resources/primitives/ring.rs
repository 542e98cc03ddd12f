use glam::Vec3;

use crate::resources::geometry::Geometry;

/// 平面圆环（扇区）参数，位于 XY 平面
pub struct RingOptions {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub theta_segments: u32,
    pub phi_segments: u32,
    /// 起始角（弧度）
    pub theta_start: f32,
    /// 扫过的角度（弧度），可以为负
    pub theta_length: f32,
}

impl Default for RingOptions {
    fn default() -> Self {
        Self {
            inner_radius: 0.5,
            outer_radius: 1.0,
            theta_segments: 32,
            phi_segments: 1,
            theta_start: 0.0,
            theta_length: std::f32::consts::TAU,
        }
    }
}

#[must_use]
pub fn create_ring(options: &RingOptions) -> Geometry {
    let theta_segments = options.theta_segments.max(3);
    let phi_segments = options.phi_segments.max(1);
    let radius_step = (options.outer_radius - options.inner_radius) / phi_segments as f32;

    let mut positions = Vec::with_capacity(((theta_segments + 1) * (phi_segments + 1)) as usize);
    for j in 0..=phi_segments {
        let radius = options.inner_radius + j as f32 * radius_step;
        for i in 0..=theta_segments {
            let segment =
                options.theta_start + i as f32 / theta_segments as f32 * options.theta_length;
            positions.push(Vec3::new(radius * segment.cos(), radius * segment.sin(), 0.0));
        }
    }

    let mut indices = Vec::with_capacity((theta_segments * phi_segments * 6) as usize);
    for j in 0..phi_segments {
        let level = j * (theta_segments + 1);
        for i in 0..theta_segments {
            let a = i + level;
            let b = a + theta_segments + 1;
            let c = a + theta_segments + 2;
            let d = a + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry::new(positions, indices)
}
