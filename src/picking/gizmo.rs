//! Rotation indicator shown on the selected joint.
//!
//! Two translucent ring sectors (positive sweep blue, negative red) with an
//! arrow head on each, laid out per joint family so the arcs wrap the
//! joint's rotation axis.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6, PI};

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::resources::primitives::{RingOptions, create_ring, create_triangle};
use crate::resources::{Material, Mesh, hex_color};
use crate::rig::joint::{JointId, Side};
use crate::scene::node::Node;
use crate::scene::{NodeHandle, Scene};

/// Node name of the gizmo group.
pub const GIZMO_NAME: &str = "AxesHelper";

const POSITIVE_COLOR: u32 = 0x0000FF;
const NEGATIVE_COLOR: u32 = 0xFF0000;
const OPACITY: f32 = 0.5;

/// Joints that share a gizmo layout up to a left/right flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoFamily {
    Shoulder,
    /// Legs and knees.
    Leg,
    /// Lower motor boxes.
    Ankle,
    /// Arms, hands and upper motor boxes.
    Limb,
    Foot,
    Thigh,
}

impl GizmoFamily {
    /// `None` for `Body` and `Head`, which never show a gizmo.
    #[must_use]
    pub fn of(joint: JointId) -> Option<Self> {
        use JointId as J;
        Some(match joint {
            J::Body | J::Head => return None,
            J::Lsh | J::Rsh => Self::Shoulder,
            J::Lleg | J::Lkne | J::Rleg | J::Rkne => Self::Leg,
            J::Lbmb | J::Rbmb => Self::Ankle,
            J::Larm | J::Lhnd | J::Lumb | J::Rarm | J::Rhnd | J::Rumb => Self::Limb,
            J::Lfot | J::Rfot => Self::Foot,
            J::Ltht | J::Rtht => Self::Thigh,
        })
    }
}

/// Euler XYZ rotation and position of the gizmo group in its pivot's frame.
#[must_use]
pub fn layout(joint: JointId) -> Option<(Vec3, Vec3)> {
    let family = GizmoFamily::of(joint)?;
    let s = if joint.side() == Some(Side::Right) { -1.0 } else { 1.0 };

    let (delta, offset) = match family {
        GizmoFamily::Shoulder => (Vec3::new(0.0, s * FRAC_PI_2, 0.0), Vec3::new(s * 2.0, 0.0, 0.0)),
        GizmoFamily::Leg => (Vec3::new(0.0, s * FRAC_PI_2, 0.0), Vec3::new(s * 4.0, 0.0, 0.0)),
        GizmoFamily::Ankle => (Vec3::new(0.0, -s * FRAC_PI_2, -PI), Vec3::new(s * 4.0, 0.0, 0.0)),
        GizmoFamily::Limb => (Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)),
        GizmoFamily::Foot => (Vec3::new(0.0, PI, 0.0), Vec3::new(0.0, 0.0, 2.0)),
        GizmoFamily::Thigh => (Vec3::new(FRAC_PI_2, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0)),
    };
    Some((Vec3::new(0.0, 0.0, PI) + delta, offset))
}

/// Builds the gizmo for `joint` under `pivot`. Returns the group handle,
/// or `None` for joints without a layout.
pub fn build_gizmo(scene: &mut Scene, pivot: NodeHandle, joint: JointId) -> Option<NodeHandle> {
    let (euler, offset) = layout(joint)?;

    let mut group = Node::new(GIZMO_NAME);
    group.transform.position = offset;
    group.transform.rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
    let handle = scene.add_to_parent(group, pivot);

    let positive = Material::helper(hex_color(POSITIVE_COLOR), OPACITY);
    let negative = Material::helper(hex_color(NEGATIVE_COLOR), OPACITY);

    let arrow = create_triangle(Vec2::new(-3.0, 0.0), Vec2::new(-2.0, 1.5), Vec2::new(-1.0, 0.0));
    let arrow_n = Mesh::helper(arrow.clone(), negative.clone()).with_name("arrow-n");
    let arrow_p = Mesh::helper(arrow, positive.clone()).with_name("arrow-p");
    let tm1 = scene.add_mesh_to_parent(arrow_n, handle);
    let tm2 = scene.add_mesh_to_parent(arrow_p, handle);
    if let Some(node) = scene.get_node_mut(tm1) {
        node.transform.set_rotation_euler(0.0, 0.0, FRAC_PI_6);
    }
    if let Some(node) = scene.get_node_mut(tm2) {
        node.transform.set_rotation_euler(0.0, PI, FRAC_PI_6);
    }

    let rings = [(FRAC_PI_3, positive, "ring-p"), (-FRAC_PI_3, negative, "ring-n")];
    for (sweep, material, name) in rings {
        let ring = create_ring(&RingOptions {
            inner_radius: 1.5,
            outer_radius: 2.5,
            theta_segments: 32,
            phi_segments: 1,
            theta_start: PI * 1.5,
            theta_length: sweep,
        });
        scene.add_mesh_to_parent(Mesh::helper(ring, material).with_name(name), handle);
    }

    Some(handle)
}
