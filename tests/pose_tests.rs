//! Pose Applicator Tests
//!
//! Tests for:
//! - Full pose application: sign * radians on the configured axis only
//! - Malformed poses and unknown joints leave state untouched
//! - Single joint updates and forward kinematics through the pivot chain

mod common;

use glam::{EulerRot, Quat, Vec3};

use common::{approx_eq, vec3_approx};
use rigview::assets::MemoryAssetLoader;
use rigview::errors::RigError;
use rigview::rig::joint::{AxisDim, JointId};
use rigview::rig::{Rig, RigBuilder};
use rigview::scene::Scene;

fn new_rig() -> (Scene, Rig) {
    let loader = MemoryAssetLoader::new();
    let mut scene = Scene::new();
    let (rig, _pending) = RigBuilder::new(&loader).build(&mut scene).unwrap();
    scene.update_matrix_world();
    (scene, rig)
}

fn distinct_pose() -> [f32; 18] {
    std::array::from_fn(|i| 5.0 * (i as f32 + 1.0))
}

fn all_rotations(rig: &Rig) -> Vec<Vec3> {
    rig.joints().map(|j| j.rotation()).collect()
}

fn world_position(scene: &Scene, rig: &Rig, id: JointId) -> Vec3 {
    scene.get_node(rig.pivot(id)).unwrap().world_matrix().translation.into()
}

// ============================================================================
// Full Pose
// ============================================================================

#[test]
fn set_pose_applies_each_angle_to_its_joint() {
    let (mut scene, mut rig) = new_rig();
    let angles = distinct_pose();
    rig.set_pose(&mut scene, &angles).unwrap();

    for (i, id) in JointId::POSABLE.iter().enumerate() {
        let spec = rig.joint(*id).spec;
        let expected = f32::from(spec.axis.sign) * angles[i].to_radians();
        let rotation = rig.joint_rotation(*id);

        let (on_axis, off_axis) = match spec.axis.dim {
            AxisDim::X => (rotation.x, [rotation.y, rotation.z]),
            AxisDim::Y => (rotation.y, [rotation.x, rotation.z]),
            AxisDim::Z => (rotation.z, [rotation.x, rotation.y]),
        };
        assert!(approx_eq(on_axis, expected), "{id}: {on_axis} != {expected}");
        assert_eq!(off_axis, [0.0, 0.0], "{id} touched another axis");
        assert!((rig.joint_angle(*id) - angles[i]).abs() < 1e-3);
    }
}

#[test]
fn set_pose_writes_pivot_transform() {
    let (mut scene, mut rig) = new_rig();
    let mut angles = [0.0; 18];
    angles[0] = 90.0;
    rig.set_pose(&mut scene, &angles).unwrap();

    let pivot = scene.get_node(rig.pivot(JointId::Lsh)).unwrap();
    let expected = Quat::from_euler(EulerRot::XYZ, -std::f32::consts::FRAC_PI_2, 0.0, 0.0);
    assert!(pivot.transform.rotation.angle_between(expected) < 1e-4);
}

#[test]
fn set_pose_leaves_body_and_head_alone() {
    let (mut scene, mut rig) = new_rig();
    rig.set_pose(&mut scene, &distinct_pose()).unwrap();
    assert_eq!(rig.joint_rotation(JointId::Body), Vec3::ZERO);
    assert_eq!(rig.joint_rotation(JointId::Head), Vec3::ZERO);
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn malformed_pose_changes_nothing() {
    let (mut scene, mut rig) = new_rig();
    rig.set_pose(&mut scene, &distinct_pose()).unwrap();
    let before = all_rotations(&rig);

    let err = rig.set_pose(&mut scene, &[1.0; 17]).unwrap_err();
    assert!(matches!(err, RigError::MalformedPose { expected: 18, actual: 17 }));
    let err = rig.set_pose(&mut scene, &[1.0; 19]).unwrap_err();
    assert!(matches!(err, RigError::MalformedPose { expected: 18, actual: 19 }));

    assert_eq!(all_rotations(&rig), before);
}

#[test]
fn non_finite_pose_changes_nothing() {
    let (mut scene, mut rig) = new_rig();
    let mut angles = [10.0; 18];
    angles[17] = f32::INFINITY;
    let err = rig.set_pose(&mut scene, &angles).unwrap_err();
    assert!(matches!(err, RigError::NonFiniteAngle { index: 17 }));
    assert!(all_rotations(&rig).iter().all(|r| *r == Vec3::ZERO));
}

#[test]
fn unknown_joint_is_rejected() {
    let (mut scene, mut rig) = new_rig();
    let before = all_rotations(&rig);

    assert!(matches!(
        rig.set_joint_angle_by_code(&mut scene, "LXX", 10.0),
        Err(RigError::InvalidJoint(_))
    ));
    assert!(matches!(
        rig.set_joint_angle_by_index(&mut scene, 18, 10.0),
        Err(RigError::InvalidJoint(_))
    ));
    assert_eq!(all_rotations(&rig), before);
}

// ============================================================================
// Single Joint & Kinematics
// ============================================================================

#[test]
fn single_joint_by_code_and_index() {
    let (mut scene, mut rig) = new_rig();
    assert_eq!(rig.set_joint_angle_by_code(&mut scene, "rarm", 30.0).unwrap(), JointId::Rarm);
    assert!(approx_eq(rig.joint_rotation(JointId::Rarm).z, -30f32.to_radians()));

    assert_eq!(rig.set_joint_angle_by_index(&mut scene, 1, 45.0).unwrap(), JointId::Ltht);
    assert!(approx_eq(rig.joint_rotation(JointId::Ltht).y, 45f32.to_radians()));
}

#[test]
fn rotating_shoulder_moves_only_its_arm() {
    let (mut scene, mut rig) = new_rig();
    let hand_before = world_position(&scene, &rig, JointId::Lhnd);
    let other_before = world_position(&scene, &rig, JointId::Rhnd);
    let shoulder_before = world_position(&scene, &rig, JointId::Lsh);

    rig.set_joint_angle(&mut scene, JointId::Lsh, 90.0);
    scene.update_matrix_world();

    assert!(!vec3_approx(world_position(&scene, &rig, JointId::Lhnd), hand_before));
    assert!(vec3_approx(world_position(&scene, &rig, JointId::Rhnd), other_before));
    assert!(vec3_approx(world_position(&scene, &rig, JointId::Lsh), shoulder_before));
}

#[test]
fn shoulder_rotation_follows_axis_sign() {
    let (mut scene, mut rig) = new_rig();
    rig.set_joint_angle(&mut scene, JointId::Lsh, 90.0);
    scene.update_matrix_world();

    // -90 degrees about X maps the arm's local (y, z) offset to (z, -y)
    let shoulder = world_position(&scene, &rig, JointId::Lsh);
    let arm = world_position(&scene, &rig, JointId::Larm);
    assert!(vec3_approx(arm - shoulder, Vec3::new(1.95, 1.5, 0.9)));
}
