//! Articulated robot model.
//!
//! - [`joint`]: joint identifiers, axes, and the immutable [`JointSpec`]
//! - [`registry`]: the static joint table and tree validation
//! - [`builder`]: assembles pivots in a [`Scene`] and requests visual assets
//! - [`pose`]: single-joint and full-pose angle application
//!
//! A [`Rig`] is a typed view over scene nodes: one [`JointNode`] per joint,
//! addressed by [`JointId`], each owning a pivot node and (once loaded) a
//! visual subtree. Pivots are never destroyed during a session.

pub mod builder;
pub mod joint;
pub mod pose;
pub mod registry;

pub use builder::RigBuilder;
pub use joint::{Axis, AxisDim, JointId, JointSpec, Mirror, Side};
pub use pose::Pose;

use glam::{EulerRot, Quat, Vec3};
use slotmap::SecondaryMap;

use crate::assets::ModelAsset;
use crate::resources::MeshRole;
use crate::scene::{NodeHandle, Scene};

/// Load status of a joint's visual asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualState {
    #[default]
    Pending,
    Loaded,
    /// The asset failed to load; the pivot is still rotatable.
    Failed,
}

/// Runtime record of one joint.
#[derive(Debug, Clone)]
pub struct JointNode {
    pub spec: &'static JointSpec,
    pub pivot: NodeHandle,
    pub visual: Option<NodeHandle>,
    pub visual_state: VisualState,
    /// Euler XYZ angles (radians) of the pivot. Only `spec.axis.dim` is
    /// ever written.
    rotation: Vec3,
}

impl JointNode {
    #[inline]
    #[must_use]
    pub fn id(&self) -> JointId {
        self.spec.id
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }
}

/// The kinematic tree of the robot.
pub struct Rig {
    root: NodeHandle,
    joints: Vec<JointNode>,
    /// Every node instantiated from a joint's visual asset, mapped to that joint.
    owners: SecondaryMap<NodeHandle, JointId>,
    asset_scale: f32,
}

impl Rig {
    /// The group node holding the `Body` pivot.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn joint(&self, id: JointId) -> &JointNode {
        &self.joints[id.slot()]
    }

    pub fn joints(&self) -> impl Iterator<Item = &JointNode> {
        self.joints.iter()
    }

    #[inline]
    #[must_use]
    pub fn pivot(&self, id: JointId) -> NodeHandle {
        self.joints[id.slot()].pivot
    }

    #[must_use]
    pub fn asset_scale(&self) -> f32 {
        self.asset_scale
    }

    /// Finds the joint owning `node` by checking it and its ancestors
    /// against the visual ownership map.
    #[must_use]
    pub fn owner_of(&self, scene: &Scene, node: NodeHandle) -> Option<JointId> {
        std::iter::once(node)
            .chain(scene.ancestors(node))
            .find_map(|h| self.owners.get(h).copied())
    }

    /// Model meshes of a joint's visual, depth-first. Empty until loaded.
    #[must_use]
    pub fn visual_meshes(&self, scene: &Scene, id: JointId) -> Vec<NodeHandle> {
        let Some(visual) = self.joint(id).visual else {
            return Vec::new();
        };
        scene
            .traverse(visual)
            .into_iter()
            .filter(|h| scene.mesh_of(*h).is_some_and(|m| m.role == MeshRole::Model))
            .collect()
    }

    /// Places a loaded asset under the joint's pivot.
    ///
    /// The asset root gets the uniform asset scale, the mirror flip on the
    /// spec's mirror axis, and the spec's static pre-rotation. The pivot's
    /// own transform is not touched. A previously attached visual is
    /// replaced.
    pub fn attach_visual(
        &mut self,
        scene: &mut Scene,
        id: JointId,
        asset: ModelAsset,
    ) -> NodeHandle {
        if let Some(old) = self.joints[id.slot()].visual.take() {
            for h in scene.traverse(old) {
                self.owners.remove(h);
            }
            scene.remove_node(old);
        }

        let joint = &mut self.joints[id.slot()];
        let spec = joint.spec;
        let (root, created) = asset.instantiate(scene, joint.pivot);

        if let Some(node) = scene.get_node_mut(root) {
            node.transform.scale = Vec3::splat(self.asset_scale) * spec.mirror.scale_factors();
            let r = spec.static_rotation;
            node.transform.rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        }
        for h in created {
            self.owners.insert(h, id);
        }

        joint.visual = Some(root);
        joint.visual_state = VisualState::Loaded;
        log::debug!("Attached visual '{}' to {}", spec.asset_name, id);
        root
    }

    /// Records a failed load. The pivot stays in the hierarchy.
    pub fn mark_visual_failed(&mut self, id: JointId) {
        let joint = &mut self.joints[id.slot()];
        if joint.visual.is_none() {
            joint.visual_state = VisualState::Failed;
        }
    }
}
