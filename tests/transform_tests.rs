//! Transform and TransformSystem tests
//!
//! Tests for:
//! - Transform TRS composition and dirty checking
//! - Euler XYZ round trips
//! - Mirrored (negative) scale
//! - look_at orientation
//! - Hierarchical matrix propagation (full pass and subtree)

mod common;

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{EulerRot, Quat, Vec3};

use common::{approx_eq, vec3_approx};
use rigview::scene::node::Node;
use rigview::scene::transform::Transform;
use rigview::scene::Scene;

// ============================================================================
// Transform
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
}

#[test]
fn transform_dirty_check() {
    let mut t = Transform::new();
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.set_rotation_euler(0.3, 0.0, 0.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
}

#[test]
fn transform_composes_translate_rotate_scale() {
    let mut t = Transform::new();
    t.position = Vec3::new(1.0, 2.0, 3.0);
    t.rotation = Quat::from_rotation_z(FRAC_PI_2);
    t.scale = Vec3::splat(2.0);
    t.update_local_matrix();

    // scale, then rotate +X onto +Y, then translate
    let p = t.local_matrix().transform_point3(Vec3::X);
    assert!(vec3_approx(p, Vec3::new(1.0, 4.0, 3.0)));
}

#[test]
fn transform_euler_round_trip() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.4, -0.2, FRAC_PI_4);
    let e = t.rotation_euler();
    assert!(vec3_approx(e, Vec3::new(0.4, -0.2, FRAC_PI_4)));
    let q = Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z);
    assert!(q.angle_between(t.rotation) < 1e-5);
}

#[test]
fn transform_negative_scale_mirrors() {
    let mut t = Transform::new();
    t.scale = Vec3::new(-100.0, 100.0, 100.0);
    t.update_local_matrix();

    let p = t.local_matrix().transform_point3(Vec3::new(0.01, 0.02, 0.03));
    assert!(vec3_approx(p, Vec3::new(-1.0, 2.0, 3.0)));
    assert!(t.local_matrix().matrix3.determinant() < 0.0);
}

#[test]
fn transform_look_at_faces_target() {
    let mut t = Transform::new();
    t.position = Vec3::new(0.0, 0.0, 25.0);
    t.look_at(Vec3::new(0.0, -4.0, 0.0), Vec3::Y);

    let forward = t.rotation * Vec3::NEG_Z;
    let expected = (Vec3::new(0.0, -4.0, 0.0) - t.position).normalize();
    assert!(vec3_approx(forward, expected));
}

#[test]
fn transform_look_at_ignores_degenerate_up() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.1, 0.2, 0.3);
    let before = t.rotation;
    t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
    assert_eq!(t.rotation, before);
}

// ============================================================================
// Hierarchy Propagation
// ============================================================================

fn chain(scene: &mut Scene) -> [rigview::scene::NodeHandle; 3] {
    let mut a = Node::new("a");
    a.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let a = scene.add_node(a);

    let mut b = Node::new("b");
    b.transform.position = Vec3::new(0.0, 2.0, 0.0);
    let b = scene.add_to_parent(b, a);

    let mut c = Node::new("c");
    c.transform.position = Vec3::new(0.0, 0.0, 3.0);
    let c = scene.add_to_parent(c, b);
    [a, b, c]
}

fn world_pos(scene: &Scene, h: rigview::scene::NodeHandle) -> Vec3 {
    scene.get_node(h).unwrap().world_matrix().translation.into()
}

#[test]
fn hierarchy_world_is_product_of_locals() {
    let mut scene = Scene::new();
    let [a, b, c] = chain(&mut scene);
    scene.update_matrix_world();

    assert!(vec3_approx(world_pos(&scene, a), Vec3::new(1.0, 0.0, 0.0)));
    assert!(vec3_approx(world_pos(&scene, b), Vec3::new(1.0, 2.0, 0.0)));
    assert!(vec3_approx(world_pos(&scene, c), Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn hierarchy_parent_rotation_moves_descendants() {
    let mut scene = Scene::new();
    let [_, b, c] = chain(&mut scene);
    scene.update_matrix_world();

    scene.get_node_mut(b).unwrap().transform.set_rotation_euler(FRAC_PI_2, 0.0, 0.0);
    scene.update_matrix_world();

    // +90 degrees about X sends local +Z to -Y
    assert!(vec3_approx(world_pos(&scene, b), Vec3::new(1.0, 2.0, 0.0)));
    assert!(vec3_approx(world_pos(&scene, c), Vec3::new(1.0, -1.0, 0.0)));
}

#[test]
fn hierarchy_subtree_update() {
    let mut scene = Scene::new();
    let [a, b, c] = chain(&mut scene);
    scene.update_matrix_world();

    scene.get_node_mut(a).unwrap().transform.position = Vec3::new(5.0, 0.0, 0.0);
    scene.update_matrix_world();
    scene.get_node_mut(c).unwrap().transform.position = Vec3::ZERO;
    scene.update_subtree(b);

    assert!(vec3_approx(world_pos(&scene, c), Vec3::new(5.0, 2.0, 0.0)));
}

#[test]
fn hierarchy_camera_tracks_node() {
    let mut scene = Scene::new();
    let cam = scene.add_camera(rigview::scene::Camera::new_perspective(60.0, 1.0, 0.01, 100.0));
    scene.active_camera = Some(cam);
    scene.get_node_mut(cam).unwrap().transform.position = Vec3::new(0.0, 0.0, 10.0);
    scene.update_matrix_world();

    let camera = scene.main_camera().unwrap();
    assert!(vec3_approx(camera.world_position(), Vec3::new(0.0, 0.0, 10.0)));
    let ndc = camera.project(Vec3::ZERO);
    assert!(approx_eq(ndc.x, 0.0) && approx_eq(ndc.y, 0.0));
    assert!((0.0..1.0).contains(&ndc.z));
}
