//! The static joint table.
//!
//! Offsets are in world units (asset units times the asset scale). Axis signs
//! come from how each actuator is mounted, so mirrored pairs do not simply
//! invert each other: LSH/RSH differ, LARM/RARM agree. Keep every entry
//! exactly as listed.

use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::rig::joint::{Axis, AxisDim, JointId, JointSpec, Mirror};

const fn spec(
    id: JointId,
    parent: Option<JointId>,
    local_offset: Vec3,
    asset_name: &'static str,
    mirror: Mirror,
    static_rotation: Vec3,
    axis: Axis,
) -> JointSpec {
    JointSpec {
        id,
        axis,
        local_offset,
        parent,
        asset_name,
        mirror,
        static_rotation,
        selectable: !matches!(id, JointId::Body | JointId::Head),
    }
}

const NO_ROT: Vec3 = Vec3::ZERO;

use AxisDim::{X, Y, Z};
use JointId as J;

#[rustfmt::skip]
static JOINTS: [JointSpec; JointId::COUNT] = [
    spec(J::Body, None, Vec3::ZERO, "body.gltf", Mirror::None, NO_ROT, Axis::pos(Y)),
    spec(J::Head, Some(J::Body), Vec3::new(0.0, 3.2, -1.1), "HEAD.gltf", Mirror::None, NO_ROT, Axis::pos(Y)),
    // --- left ---
    spec(J::Lsh, Some(J::Body), Vec3::new(3.56, 1.85, -0.8), "SHD.gltf", Mirror::None, NO_ROT, Axis::neg(X)),
    spec(J::Ltht, Some(J::Body), Vec3::new(2.32, -3.1, -0.79), "THT.gltf", Mirror::None, NO_ROT, Axis::pos(Y)),
    spec(J::Larm, Some(J::Lsh), Vec3::new(1.95, -0.9, 1.5), "ARM.gltf", Mirror::None, NO_ROT, Axis::neg(Z)),
    spec(J::Lhnd, Some(J::Larm), Vec3::new(0.0, -4.02, 0.0), "HND.gltf", Mirror::None, NO_ROT, Axis::neg(Z)),
    spec(J::Lumb, Some(J::Ltht), Vec3::new(-0.57, -1.83, 1.2), "MOTBOX.gltf", Mirror::None, NO_ROT, Axis::neg(Z)),
    spec(J::Lleg, Some(J::Lumb), Vec3::new(-1.3, -1.53, -1.18), "LEG.gltf", Mirror::X, NO_ROT, Axis::neg(X)),
    spec(J::Lkne, Some(J::Lleg), Vec3::new(0.0, -2.6, 0.0), "KNEE.gltf", Mirror::None, NO_ROT, Axis::neg(X)),
    spec(J::Lbmb, Some(J::Lkne), Vec3::new(0.15, -3.0, 0.0), "MOTBOX.gltf", Mirror::X, Vec3::new(0.0, -FRAC_PI_2, 0.0), Axis::pos(X)),
    spec(J::Lfot, Some(J::Lbmb), Vec3::new(1.18, -1.54, 1.3), "FOOT.gltf", Mirror::None, NO_ROT, Axis::pos(Z)),
    // --- right ---
    spec(J::Rsh, Some(J::Body), Vec3::new(-3.56, 1.85, -0.8), "SHD.gltf", Mirror::X, NO_ROT, Axis::pos(X)),
    spec(J::Rtht, Some(J::Body), Vec3::new(-2.32, -3.1, -0.79), "THT.gltf", Mirror::X, NO_ROT, Axis::pos(Y)),
    spec(J::Rarm, Some(J::Rsh), Vec3::new(-1.95, -0.9, 1.5), "ARM.gltf", Mirror::None, NO_ROT, Axis::neg(Z)),
    spec(J::Rhnd, Some(J::Rarm), Vec3::new(0.0, -4.02, 0.0), "HND.gltf", Mirror::X, NO_ROT, Axis::neg(Z)),
    spec(J::Rumb, Some(J::Rtht), Vec3::new(0.57, -1.83, 1.2), "MOTBOX.gltf", Mirror::X, NO_ROT, Axis::neg(Z)),
    spec(J::Rleg, Some(J::Rumb), Vec3::new(1.3, -1.53, -1.18), "LEG.gltf", Mirror::None, NO_ROT, Axis::pos(X)),
    spec(J::Rkne, Some(J::Rleg), Vec3::new(0.0, -2.6, 0.0), "KNEE.gltf", Mirror::X, NO_ROT, Axis::pos(X)),
    spec(J::Rbmb, Some(J::Rkne), Vec3::new(-0.15, -3.0, 0.0), "MOTBOX.gltf", Mirror::None, Vec3::new(0.0, FRAC_PI_2, 0.0), Axis::neg(X)),
    spec(J::Rfot, Some(J::Rbmb), Vec3::new(-1.18, -1.54, 1.3), "FOOT.gltf", Mirror::X, NO_ROT, Axis::pos(Z)),
];

/// All joints: `Body`, `Head`, then the posable joints in pose order.
#[must_use]
pub fn list_joints() -> &'static [JointSpec] {
    &JOINTS
}

#[must_use]
pub fn joint_spec(id: JointId) -> &'static JointSpec {
    &JOINTS[id.slot()]
}

/// Posable joints in pose order.
pub fn posable_joints() -> impl Iterator<Item = &'static JointSpec> {
    JointId::POSABLE.into_iter().map(joint_spec)
}

/// Parent chain from `id` up to the root, excluding `id` itself.
///
/// Returns `None` when the chain revisits a joint or names a parent that is
/// missing from `specs`.
#[must_use]
pub fn parent_chain(specs: &[JointSpec], id: JointId) -> Option<Vec<JointId>> {
    let mut seen = HashSet::from([id]);
    let mut chain = Vec::new();
    let mut current = specs.iter().find(|s| s.id == id)?;
    while let Some(parent) = current.parent {
        if !seen.insert(parent) {
            return None;
        }
        chain.push(parent);
        current = specs.iter().find(|s| s.id == parent)?;
    }
    Some(chain)
}

/// Checks that `specs` form a single tree rooted at `Body`.
pub fn validate(specs: &[JointSpec]) -> Result<(), String> {
    if specs.len() != JointId::COUNT {
        return Err(format!("expected {} joints, found {}", JointId::COUNT, specs.len()));
    }

    let roots: Vec<_> = specs.iter().filter(|s| s.parent.is_none()).collect();
    match roots.as_slice() {
        [root] if root.id == JointId::Body => {}
        _ => return Err(format!("expected a single Body root, found {}", roots.len())),
    }

    let mut ids = HashSet::new();
    for spec in specs {
        if !ids.insert(spec.id) {
            return Err(format!("duplicate joint {}", spec.id));
        }
    }

    for spec in specs {
        let chain = parent_chain(specs, spec.id)
            .ok_or_else(|| format!("joint {} has a cyclic or dangling parent chain", spec.id))?;
        if spec.id != JointId::Body && chain.last() != Some(&JointId::Body) {
            return Err(format!("joint {} does not reach Body", spec.id));
        }
    }
    Ok(())
}
