//! Scene graph tests
//!
//! Tests for:
//! - Node creation, attach / detach and cycle rejection
//! - Recursive removal with component cleanup
//! - Visibility inheritance
//! - Model instantiation under a parent
//! - Rig construction in the scene

mod common;

use glam::Vec3;

use common::{box_asset, vec3_approx};
use rigview::assets::{MemoryAssetLoader, ModelAsset, ModelNode};
use rigview::rig::registry;
use rigview::rig::{JointId, RigBuilder};
use rigview::scene::Scene;
use rigview::scene::node::Node;

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn add_to_parent_links_both_sides() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let child = scene.add_to_parent(Node::new("child"), root);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(root));
    assert_eq!(scene.get_node(root).unwrap().children(), &[child]);
    assert_eq!(scene.root_nodes, vec![root]);
}

#[test]
fn attach_moves_between_parents() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    let b = scene.add_node(Node::new("b"));
    let c = scene.add_to_parent(Node::new("c"), a);

    scene.attach(c, b);
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[c]);

    scene.detach(c);
    assert_eq!(scene.get_node(c).unwrap().parent(), None);
    assert!(scene.root_nodes.contains(&c));
}

#[test]
fn attach_rejects_cycles() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    let b = scene.add_to_parent(Node::new("b"), a);

    scene.attach(a, b);
    scene.attach(a, a);
    assert_eq!(scene.get_node(a).unwrap().parent(), None);
    assert_eq!(scene.get_node(b).unwrap().parent(), Some(a));
}

#[test]
fn remove_node_drops_subtree_and_components() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let group = scene.add_to_parent(Node::new("group"), root);
    let asset = box_asset("box");
    let (model, created) = asset.instantiate(&mut scene, group);
    assert_eq!(scene.meshes.len(), 1);

    scene.remove_node(group);
    assert!(scene.get_node(group).is_none());
    assert!(scene.get_node(model).is_none());
    assert!(created.iter().all(|h| scene.get_node(*h).is_none()));
    assert!(scene.meshes.is_empty());
    assert!(scene.get_node(root).unwrap().children().is_empty());
}

#[test]
fn visibility_is_inherited() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    let b = scene.add_to_parent(Node::new("b"), a);
    assert!(scene.is_visible_in_tree(b));

    scene.get_node_mut(a).unwrap().visible = false;
    assert!(!scene.is_visible_in_tree(b));
}

#[test]
fn traverse_is_depth_first_preorder() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    let b = scene.add_to_parent(Node::new("b"), a);
    let c = scene.add_to_parent(Node::new("c"), b);
    let d = scene.add_to_parent(Node::new("d"), a);
    assert_eq!(scene.traverse(a), vec![a, b, c, d]);
}

// ============================================================================
// Models
// ============================================================================

#[test]
fn instantiate_copies_node_tree() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("pivot"));

    let mesh = box_asset("x").root.children[0].children[0].mesh.clone().unwrap();
    let mesh_node = ModelNode::mesh("part", mesh).with_position(Vec3::new(0.0, 1.0, 0.0));
    let asset = ModelAsset::new("m", ModelNode::group("m").with_child(mesh_node));
    assert_eq!(asset.mesh_count(), 1);

    let (root, created) = asset.instantiate(&mut scene, parent);
    assert_eq!(created.len(), 2);
    assert_eq!(scene.get_node(root).unwrap().parent(), Some(parent));

    let part = created[1];
    assert_eq!(scene.get_node(part).unwrap().name, "part");
    assert!(scene.mesh_of(part).is_some());
    assert_eq!(scene.get_node(part).unwrap().transform.position, Vec3::new(0.0, 1.0, 0.0));
}

// ============================================================================
// Rig Construction
// ============================================================================

#[test]
fn rig_builder_creates_pivot_tree() {
    let loader = MemoryAssetLoader::new();
    let mut scene = Scene::new();
    let (rig, pending) = RigBuilder::new(&loader).build(&mut scene).unwrap();
    scene.update_matrix_world();

    assert_eq!(pending.total(), 20);
    assert_eq!(scene.get_node(rig.root()).unwrap().name, "Robot");

    for spec in registry::list_joints() {
        let pivot = scene.get_node(rig.pivot(spec.id)).unwrap();
        assert_eq!(pivot.name, format!("pivot-{}", spec.id.code()));
        assert_eq!(pivot.transform.position, spec.local_offset);
        let expected_parent = spec.parent.map_or(rig.root(), |p| rig.pivot(p));
        assert_eq!(pivot.parent(), Some(expected_parent));
    }

    let hand = scene.get_node(rig.pivot(JointId::Lhnd)).unwrap();
    let hand: Vec3 = hand.world_matrix().translation.into();
    assert!(vec3_approx(hand, Vec3::new(5.51, -3.07, 0.7)));
}

#[test]
fn rig_owner_lookup_walks_ancestors() {
    let loader = common::full_loader();
    let mut scene = Scene::new();
    let (mut rig, mut pending) = RigBuilder::new(&loader).build(&mut scene).unwrap();
    for (id, result) in pending.poll_ready() {
        rig.attach_visual(&mut scene, id, result.unwrap());
    }

    let meshes = rig.visual_meshes(&scene, JointId::Rkne);
    assert_eq!(meshes.len(), 1);
    assert_eq!(rig.owner_of(&scene, meshes[0]), Some(JointId::Rkne));
    assert_eq!(rig.owner_of(&scene, rig.root()), None);
}
