use glam::{Affine3A, EulerRot, Mat3, Quat, Vec3};

/// Local TRS of a scene node plus its cached matrices.
///
/// The local matrix is `T * R * S`. A negative scale component mirrors the
/// node and is composed as-is; it is never decomposed back out. Joint pivots
/// only ever change `rotation`, visual roots carry the scale.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    // values the cached local matrix was built from
    built_from: (Vec3, Quat, Vec3),
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
            built_from: (Vec3::ZERO, Quat::IDENTITY, Vec3::ONE),
            force_update: true,
        }
    }

    /// Rebuilds the local matrix if TRS changed since the last call, or if
    /// the transform was marked dirty. Returns whether it was rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let current = (self.position, self.rotation, self.scale);
        if current == self.built_from && !self.force_update {
            return false;
        }

        self.local_matrix =
            Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);
        self.built_from = current;
        self.force_update = false;
        true
    }

    /// Replaces the rotation with XYZ-order Euler angles in radians.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    /// Valid after the last transform pass.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    pub(crate) fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Turns `-Z` toward `target`, keeping `up` as close to `+Y` of the
    /// result as possible. Both are in the parent's space. Leaves the
    /// rotation alone when looking straight along `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();
        let side = forward.cross(up);
        if side.length_squared() < 1e-4 {
            return;
        }

        let right = side.normalize();
        let new_up = right.cross(forward).normalize();
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, new_up, -forward));
    }

    /// Forces the next [`Transform::update_local_matrix`] to rebuild, e.g.
    /// after reparenting.
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
