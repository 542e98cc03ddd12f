//! Picking & Selection Tests
//!
//! Tests for:
//! - Select / switch / reselect / deselect transitions
//! - Highlight and gizmo bookkeeping
//! - Non-selectable joints and gizmo hits
//! - Host notifications for selection changes

mod common;

use glam::{Vec2, Vec3};

use common::{TestViewer, joint_ndc, ready_viewer, selection_events};
use rigview::host::HostEvent;
use rigview::picking::GIZMO_NAME;
use rigview::rig::JointId;

const HIGHLIGHT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

fn emissive_of(viewer: &TestViewer, id: JointId) -> Vec<Vec3> {
    viewer
        .rig()
        .visual_meshes(viewer.scene(), id)
        .into_iter()
        .map(|h| viewer.scene().mesh_of(h).unwrap().material.emissive)
        .collect()
}

fn gizmo_parents(viewer: &TestViewer) -> Vec<rigview::scene::NodeHandle> {
    viewer
        .scene()
        .nodes
        .values()
        .filter(|n| n.name == GIZMO_NAME)
        .filter_map(|n| n.parent())
        .collect()
}

fn pick_joint(viewer: &mut TestViewer, id: JointId) -> Option<JointId> {
    let ndc = joint_ndc(viewer, id);
    viewer.pick_ndc(ndc)
}

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn pick_selects_joint_and_notifies() {
    let (mut viewer, sink) = ready_viewer();
    assert_eq!(pick_joint(&mut viewer, JointId::Lsh), Some(JointId::Lsh));

    assert_eq!(viewer.selection().selected(), Some(JointId::Lsh));
    assert!(viewer.selection().highlight_active());
    assert!(emissive_of(&viewer, JointId::Lsh).iter().all(|e| *e == HIGHLIGHT));
    assert_eq!(selection_events(&sink.take()), vec![Some(0)]);
}

#[test]
fn switching_selection_moves_highlight_and_gizmo() {
    let (mut viewer, sink) = ready_viewer();
    pick_joint(&mut viewer, JointId::Lsh);
    pick_joint(&mut viewer, JointId::Rsh);

    assert_eq!(viewer.selection().selected(), Some(JointId::Rsh));
    assert!(emissive_of(&viewer, JointId::Lsh).iter().all(|e| *e == Vec3::ZERO));
    assert!(emissive_of(&viewer, JointId::Rsh).iter().all(|e| *e == HIGHLIGHT));

    let parents = gizmo_parents(&viewer);
    assert_eq!(parents, vec![viewer.rig().pivot(JointId::Rsh)]);
    let gizmo = viewer.selection().gizmo().unwrap();
    assert_eq!(viewer.scene().get_node(gizmo).unwrap().parent(), Some(parents[0]));

    assert_eq!(selection_events(&sink.take()), vec![Some(0), Some(9)]);
}

#[test]
fn reselecting_is_a_no_op() {
    let (mut viewer, sink) = ready_viewer();
    pick_joint(&mut viewer, JointId::Lleg);
    let gizmo = viewer.selection().gizmo();
    sink.take();

    pick_joint(&mut viewer, JointId::Lleg);

    assert_eq!(viewer.selection().selected(), Some(JointId::Lleg));
    assert_eq!(viewer.selection().gizmo(), gizmo);
    assert_eq!(gizmo_parents(&viewer).len(), 1);
    assert!(selection_events(&sink.take()).is_empty());
}

#[test]
fn empty_pick_clears_selection() {
    let (mut viewer, sink) = ready_viewer();
    pick_joint(&mut viewer, JointId::Rarm);
    sink.take();

    assert_eq!(viewer.pick_ndc(Vec2::new(-0.99, 0.99)), None);

    assert_eq!(viewer.selection().selected(), None);
    assert!(!viewer.selection().highlight_active());
    assert!(gizmo_parents(&viewer).is_empty());
    assert!(emissive_of(&viewer, JointId::Rarm).iter().all(|e| *e == Vec3::ZERO));
    assert_eq!(selection_events(&sink.take()), vec![None]);
}

#[test]
fn empty_pick_without_selection_is_silent() {
    let (mut viewer, sink) = ready_viewer();
    viewer.pick_ndc(Vec2::new(-0.99, 0.99));
    assert!(selection_events(&sink.take()).is_empty());
}

// ============================================================================
// Non-selectable Targets
// ============================================================================

#[test]
fn body_pick_deselects() {
    let (mut viewer, sink) = ready_viewer();
    pick_joint(&mut viewer, JointId::Lsh);
    sink.take();

    assert_eq!(pick_joint(&mut viewer, JointId::Body), None);
    assert_eq!(viewer.selection().selected(), None);
    assert_eq!(selection_events(&sink.take()), vec![None]);
}

#[test]
fn body_pick_without_selection_is_silent() {
    let (mut viewer, sink) = ready_viewer();
    assert_eq!(pick_joint(&mut viewer, JointId::Head), None);
    assert!(selection_events(&sink.take()).is_empty());
}

#[test]
fn gizmo_pick_keeps_selection() {
    let (mut viewer, sink) = ready_viewer();
    pick_joint(&mut viewer, JointId::Larm);
    sink.take();

    let gizmo = viewer.selection().gizmo().unwrap();
    let scene = viewer.scene();
    let ring = scene
        .traverse(gizmo)
        .into_iter()
        .find(|h| scene.get_node(*h).is_some_and(|n| n.name == "ring-p"))
        .unwrap();
    let tri = scene.mesh_of(ring).unwrap().geometry.triangles().nth(10).unwrap();
    let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
    let world = scene.get_node(ring).unwrap().world_matrix().transform_point3(centroid);
    let ndc = viewer.camera().unwrap().project(world).truncate();

    assert_eq!(viewer.pick_ndc(ndc), Some(JointId::Larm));
    assert_eq!(viewer.selection().gizmo(), Some(gizmo));
    assert!(sink.take().is_empty());
}

// ============================================================================
// Pose Interplay
// ============================================================================

#[test]
fn set_pose_clears_selection() {
    let (mut viewer, sink) = ready_viewer();
    pick_joint(&mut viewer, JointId::Rkne);
    sink.take();

    viewer.set_pose(&[0.0; 18]).unwrap();
    assert_eq!(viewer.selection().selected(), None);
    assert!(gizmo_parents(&viewer).is_empty());
    assert_eq!(selection_events(&sink.take()), vec![None]);
}

#[test]
fn selected_joint_angle_targets_selection() {
    let (mut viewer, sink) = ready_viewer();
    assert_eq!(viewer.set_selected_joint_angle(20.0).unwrap(), None);
    assert!(sink.take().iter().any(|e| matches!(e, HostEvent::Log(_))));

    pick_joint(&mut viewer, JointId::Rsh);
    assert_eq!(viewer.set_selected_joint_angle(20.0).unwrap(), Some(JointId::Rsh));
    assert!((viewer.rig().joint_angle(JointId::Rsh) - 20.0).abs() < 1e-4);
    assert_eq!(viewer.selection().selected(), Some(JointId::Rsh));
}

#[test]
fn tap_uses_pixel_coordinates() {
    let (mut viewer, _sink) = ready_viewer();
    let ndc = joint_ndc(&viewer, JointId::Ltht);
    let size = Vec2::new(viewer.settings().width as f32, viewer.settings().height as f32);
    let px = (ndc.x + 1.0) * 0.5 * size.x;
    let py = (1.0 - ndc.y) * 0.5 * size.y;
    assert_eq!(viewer.tap(px, py), Some(JointId::Ltht));
}
