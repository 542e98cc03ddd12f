use glam::{Vec2, Vec3};

use crate::resources::geometry::BoundingBox;
use crate::scene::{Camera, NodeHandle, Scene};

const EPSILON: f32 = 1e-7;

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test. Returns the entry distance, or `None` when the box is
    /// missed or lies entirely behind the origin.
    #[must_use]
    pub fn intersect_box(&self, aabb: &BoundingBox) -> Option<f32> {
        let inv = self.direction.recip();
        let t0 = (aabb.min - self.origin) * inv;
        let t1 = (aabb.max - self.origin) * inv;

        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();

        // NaN from 0 * inf compares false and falls through to a miss
        if t_far >= t_near.max(0.0) {
            Some(t_near.max(0.0))
        } else {
            None
        }
    }

    /// Möller-Trumbore, both faces. Returns the distance along the ray.
    #[must_use]
    pub fn intersect_triangle(&self, [a, b, c]: [Vec3; 3]) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let h = self.direction.cross(edge2);
        let det = edge1.dot(h);

        // Parallel to the triangle plane
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let s = self.origin - a;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * self.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        (t > EPSILON).then_some(t)
    }
}

/// The nearest mesh hit of a raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub node: NodeHandle,
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    pub ray: Ray,
    pub near: f32,
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            ray: Ray::new(Vec3::ZERO, Vec3::NEG_Z),
            near: 0.0,
            far: f32::INFINITY,
        }
    }
}

impl Raycaster {
    /// Aims the ray from the camera through a point in normalized device
    /// coordinates (`x`, `y` in `[-1, 1]`, `y` up).
    ///
    /// Camera matrices must be current.
    #[must_use]
    pub fn from_camera(ndc: Vec2, camera: &Camera) -> Self {
        let origin = camera.world_position();
        let target = camera.unproject(ndc.extend(0.5));
        Self {
            ray: Ray::new(origin, target - origin),
            near: camera.near,
            far: camera.far,
        }
    }

    /// Nearest hit among visible meshes in `root`'s subtree.
    ///
    /// Triangles are tested in world space, so negative scale on any
    /// ancestor needs no special care. On equal distance the mesh visited
    /// first in depth-first order wins. World matrices must be current.
    #[must_use]
    pub fn intersect_subtree(&self, scene: &Scene, root: NodeHandle) -> Option<Intersection> {
        let mut best: Option<Intersection> = None;

        for handle in scene.traverse(root) {
            let Some(node) = scene.get_node(handle) else {
                continue;
            };
            let Some(mesh) = scene.mesh_of(handle) else {
                continue;
            };
            if !mesh.visible || !scene.is_visible_in_tree(handle) {
                continue;
            }

            let world = node.world_matrix();
            let Some(bounds) = mesh.geometry.bounding_box() else {
                continue;
            };
            let Some(entry) = self.ray.intersect_box(&bounds.transform(world)) else {
                continue;
            };
            if best.is_some_and(|b| entry > b.distance) || entry > self.far {
                continue;
            }

            for tri in mesh.geometry.triangles() {
                let tri = tri.map(|p| world.transform_point3(p));
                let Some(t) = self.ray.intersect_triangle(tri) else {
                    continue;
                };
                if t < self.near || t > self.far {
                    continue;
                }
                if best.is_none_or(|b| t < b.distance) {
                    best = Some(Intersection {
                        node: handle,
                        distance: t,
                        point: self.ray.point_at(t),
                    });
                }
            }
        }

        best
    }
}
