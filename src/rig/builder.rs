use slotmap::SecondaryMap;

use crate::assets::{AssetLoader, PendingLoads};
use crate::errors::{Result, RigError};
use crate::rig::joint::{JointId, JointSpec};
use crate::rig::registry;
use crate::rig::{JointNode, Rig, VisualState};
use crate::scene::node::Node;
use crate::scene::{NodeHandle, Scene};

/// Uniform scale applied to every visual asset root.
pub const DEFAULT_ASSET_SCALE: f32 = 100.0;

/// Assembles the pivot hierarchy of a [`Rig`] and requests its visuals.
///
/// ```rust,ignore
/// let (rig, pending) = RigBuilder::new(&loader).build(&mut scene)?;
/// ```
pub struct RigBuilder<'a> {
    loader: &'a dyn AssetLoader,
    specs: &'static [JointSpec],
    asset_scale: f32,
}

impl<'a> RigBuilder<'a> {
    #[must_use]
    pub fn new(loader: &'a dyn AssetLoader) -> Self {
        Self {
            loader,
            specs: registry::list_joints(),
            asset_scale: DEFAULT_ASSET_SCALE,
        }
    }

    #[must_use]
    pub fn with_specs(mut self, specs: &'static [JointSpec]) -> Self {
        self.specs = specs;
        self
    }

    #[must_use]
    pub fn with_asset_scale(mut self, scale: f32) -> Self {
        self.asset_scale = scale;
        self
    }

    /// Creates a `"Robot"` group at the scene root with one pivot per joint
    /// beneath it, then starts one load per joint.
    ///
    /// Pivots are created parents-first so each child can be attached on
    /// creation. Loads are only started, never awaited: drive the returned
    /// [`PendingLoads`] and hand results to [`Rig::attach_visual`].
    pub fn build(self, scene: &mut Scene) -> Result<(Rig, PendingLoads<JointId>)> {
        registry::validate(self.specs).map_err(RigError::InvalidRegistry)?;

        let root = scene.add_node(Node::new("Robot"));
        let mut pivots: [Option<NodeHandle>; JointId::COUNT] = [None; JointId::COUNT];

        for spec in self.creation_order() {
            let parent = match spec.parent {
                Some(p) => pivots[p.slot()].ok_or_else(|| {
                    RigError::InvalidRegistry(format!("parent of {} not built", spec.id))
                })?,
                None => root,
            };
            let mut node = Node::new(format!("pivot-{}", spec.id));
            node.transform.position = spec.local_offset;
            pivots[spec.id.slot()] = Some(scene.add_to_parent(node, parent));
        }

        let mut joints = Vec::with_capacity(JointId::COUNT);
        for (slot, pivot) in pivots.into_iter().enumerate() {
            let spec = self
                .specs
                .iter()
                .find(|s| s.id.slot() == slot)
                .ok_or_else(|| RigError::InvalidRegistry(format!("no joint in slot {slot}")))?;
            let pivot = pivot
                .ok_or_else(|| RigError::InvalidRegistry(format!("{} has no pivot", spec.id)))?;
            joints.push(JointNode {
                spec,
                pivot,
                visual: None,
                visual_state: VisualState::Pending,
                rotation: glam::Vec3::ZERO,
            });
        }

        let mut pending = PendingLoads::new();
        for spec in self.specs {
            log::debug!("Requesting '{}' for {}", spec.asset_name, spec.id);
            pending.push(spec.id, self.loader.load(spec.asset_name));
        }

        log::info!("Rig assembled: {} pivots, {} loads in flight", joints.len(), pending.total());

        Ok((
            Rig {
                root,
                joints,
                owners: SecondaryMap::new(),
                asset_scale: self.asset_scale,
            },
            pending,
        ))
    }

    /// Specs ordered so that every parent precedes its children.
    fn creation_order(&self) -> Vec<&'static JointSpec> {
        let mut ordered: Vec<&'static JointSpec> = self.specs.iter().collect();
        ordered.sort_by_key(|s| registry::parent_chain(self.specs, s.id).map_or(0, |c| c.len()));
        ordered
    }
}
