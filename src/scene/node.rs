use std::borrow::Cow;

use glam::Affine3A;
use smallvec::SmallVec;

use crate::scene::transform::Transform;
use crate::scene::{CameraKey, MeshKey, NodeHandle};

/// A scene node: hierarchy links, transform, and optional components.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: non-owning back-reference used for ancestor walks
/// - `children`: owned child handles, in attachment order
///
/// Use [`Scene::attach`](crate::scene::Scene::attach) to keep both sides in
/// sync.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Cow<'static, str>,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: SmallVec<[NodeHandle; 4]>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Core State ===
    /// Invisible nodes (and their subtrees) are skipped by rendering and picking.
    pub visible: bool,

    // === Components ===
    pub mesh: Option<MeshKey>,
    pub camera: Option<CameraKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: SmallVec::new(),
            transform: Transform::new(),
            visible: true,
            mesh: None,
            camera: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// World matrix as of the last transform system pass.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
