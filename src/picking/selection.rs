use glam::Vec3;

use crate::picking::gizmo;
use crate::picking::raycaster::Intersection;
use crate::rig::{JointId, Rig};
use crate::scene::{NodeHandle, Scene};

/// What a tap means for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// A selectable joint's visual was hit.
    Joint(JointId),
    /// Nothing hit, or a joint that cannot be selected.
    Nothing,
    /// The gizmo itself was hit; the selection must not change.
    Gizmo,
}

/// Classifies the nearest hit of a tap.
#[must_use]
pub fn resolve_hit(scene: &Scene, rig: &Rig, hit: Option<&Intersection>) -> PickTarget {
    let Some(hit) = hit else {
        return PickTarget::Nothing;
    };
    if scene.mesh_of(hit.node).is_some_and(|m| m.is_helper()) {
        return PickTarget::Gizmo;
    }
    match rig.owner_of(scene, hit.node) {
        Some(id) if rig.joint(id).spec.selectable => PickTarget::Joint(id),
        _ => PickTarget::Nothing,
    }
}

/// Single-joint selection with emissive highlight and gizmo.
///
/// At most one gizmo exists at a time and it always hangs under the
/// selected joint's pivot.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<JointId>,
    highlight_active: bool,
    gizmo: Option<NodeHandle>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<JointId> {
        self.selected
    }

    #[inline]
    #[must_use]
    pub fn highlight_active(&self) -> bool {
        self.highlight_active
    }

    #[inline]
    #[must_use]
    pub fn gizmo(&self) -> Option<NodeHandle> {
        self.gizmo
    }

    /// Applies a tap result. Returns `true` when the selection changed.
    pub fn apply(
        &mut self,
        scene: &mut Scene,
        rig: &Rig,
        target: PickTarget,
        highlight: Vec3,
    ) -> bool {
        match target {
            PickTarget::Joint(id) => self.select(scene, rig, id, highlight),
            PickTarget::Nothing => self.clear(scene, rig),
            PickTarget::Gizmo => false,
        }
    }

    /// Selects `id`. Returns `false` when it was already selected.
    pub fn select(&mut self, scene: &mut Scene, rig: &Rig, id: JointId, highlight: Vec3) -> bool {
        if self.selected == Some(id) {
            return false;
        }
        self.clear(scene, rig);

        set_emissive(scene, rig, id, highlight);
        self.highlight_active = true;
        self.gizmo = gizmo::build_gizmo(scene, rig.pivot(id), id);
        self.selected = Some(id);
        log::debug!("Selected {id}");
        true
    }

    /// Clears highlight and gizmo. Returns `false` when nothing was selected.
    pub fn clear(&mut self, scene: &mut Scene, rig: &Rig) -> bool {
        let Some(previous) = self.selected.take() else {
            return false;
        };
        if self.highlight_active {
            set_emissive(scene, rig, previous, Vec3::ZERO);
            self.highlight_active = false;
        }
        if let Some(gizmo) = self.gizmo.take() {
            scene.remove_node(gizmo);
        }
        log::debug!("Deselected {previous}");
        true
    }
}

fn set_emissive(scene: &mut Scene, rig: &Rig, id: JointId, emissive: Vec3) {
    for handle in rig.visual_meshes(scene, id) {
        if let Some(mesh) = scene.mesh_of_mut(handle) {
            mesh.material.emissive = emissive;
        }
    }
}
