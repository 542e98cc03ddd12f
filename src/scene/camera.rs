use std::borrow::Cow;

use glam::{Affine3A, Mat4, Vec3, Vec4};

/// 透视相机组件
///
/// 只负责投影属性和缓存矩阵；位置与朝向来自所挂载节点的 Transform，
/// 由变换系统在每次更新后写入。
#[derive(Debug, Clone)]
pub struct Camera {
    pub name: Cow<'static, str>,

    // === 投影属性 ===
    /// 垂直视场角（弧度）
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    // 缓存的矩阵
    pub(crate) world_matrix: Affine3A,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
}

impl Camera {
    /// `fov` 以角度传入，内部存储为弧度
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            name: Cow::Borrowed("Camera"),
            fov: fov.to_radians(),
            aspect,
            near,
            far,

            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        // glam 的 perspective_rh 使用 [0, 1] 深度范围
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    pub fn update_view_projection(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;
        self.view_matrix = Mat4::from(*world_transform).inverse();
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    /// 世界坐标 -> NDC（x, y ∈ [-1, 1]，z ∈ [0, 1]）
    #[must_use]
    pub fn project(&self, world: Vec3) -> Vec3 {
        let clip = self.view_projection_matrix * world.extend(1.0);
        clip.truncate() / clip.w
    }

    /// NDC -> 世界坐标
    #[must_use]
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        let world: Vec4 = self.view_projection_matrix.inverse() * ndc.extend(1.0);
        world.truncate() / world.w
    }
}
