use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::resources::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::{NodeHandle, Scene};

/// One node of a decoded model.
///
/// Missing fields deserialize to an identity group node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelNode {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub mesh: Option<Mesh>,
    pub children: Vec<ModelNode>,
}

impl Default for ModelNode {
    fn default() -> Self {
        Self::group("")
    }
}

impl ModelNode {
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            mesh: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name)
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: ModelNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }
}

/// A decoded model, ready to be placed in a [`Scene`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAsset {
    pub name: String,
    pub root: ModelNode,
}

impl ModelAsset {
    #[must_use]
    pub fn new(name: impl Into<String>, root: ModelNode) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Reads a model from its JSON form, the shape page scripts hand over
    /// after decoding a glTF file. Vectors are arrays, rotations are
    /// `[x, y, z, w]` quaternions.
    pub fn from_json(text: &str) -> Result<Self> {
        fn finish(node: &mut ModelNode) {
            if let Some(mesh) = &mut node.mesh {
                mesh.geometry.compute_bounding_volume();
            }
            node.children.iter_mut().for_each(finish);
        }

        let mut asset: Self = serde_json::from_str(text)?;
        finish(&mut asset.root);
        Ok(asset)
    }

    /// Convenience: a model whose scene is `group -> group -> mesh`, the
    /// nesting a typical exported glTF scene has.
    #[must_use]
    pub fn single_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        let name = name.into();
        let root = ModelNode::group(name.clone())
            .with_child(ModelNode::group("Scene").with_child(ModelNode::mesh(name.clone(), mesh)));
        Self::new(name, root)
    }

    /// Copies the model's node tree into `scene` under `parent`.
    ///
    /// Returns the handle of the instantiated root together with every
    /// created node, in depth-first order.
    pub fn instantiate(
        self,
        scene: &mut Scene,
        parent: NodeHandle,
    ) -> (NodeHandle, Vec<NodeHandle>) {
        let mut created = Vec::new();
        let root = instantiate_node(self.root, scene, parent, &mut created);
        (root, created)
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        fn count(node: &ModelNode) -> usize {
            usize::from(node.mesh.is_some()) + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

fn instantiate_node(
    model: ModelNode,
    scene: &mut Scene,
    parent: NodeHandle,
    created: &mut Vec<NodeHandle>,
) -> NodeHandle {
    let ModelNode {
        name,
        position,
        rotation,
        scale,
        mesh,
        children,
    } = model;

    let handle = match mesh {
        Some(mesh) => scene.add_mesh_to_parent(mesh.with_name(name.clone()), parent),
        None => scene.add_to_parent(Node::new(name.clone()), parent),
    };
    if let Some(node) = scene.get_node_mut(handle) {
        node.name = name.into();
        node.transform.position = position;
        node.transform.rotation = rotation;
        node.transform.scale = scale;
    }
    created.push(handle);

    for child in children {
        instantiate_node(child, scene, handle, created);
    }
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::mesh::MeshRole;

    const PART: &str = r#"{
        "name": "ARM.gltf",
        "root": {
            "name": "ARM",
            "children": [{
                "name": "arm_shell",
                "position": [0.0, -0.5, 0.0],
                "mesh": {
                    "geometry": {
                        "positions": [[0, 0, 0], [1, 0, 0], [0, 2, 0]],
                        "indices": [0, 1, 2]
                    },
                    "material": { "color": [0.5, 0.5, 0.5] }
                }
            }]
        }
    }"#;

    #[test]
    fn from_json_fills_defaults_and_bounds() {
        let asset = ModelAsset::from_json(PART).unwrap();
        assert_eq!(asset.mesh_count(), 1);
        assert_eq!(asset.root.scale, Vec3::ONE);
        assert_eq!(asset.root.rotation, Quat::IDENTITY);

        let part = &asset.root.children[0];
        assert_eq!(part.position, Vec3::new(0.0, -0.5, 0.0));
        let mesh = part.mesh.as_ref().unwrap();
        assert!(mesh.visible);
        assert_eq!(mesh.role, MeshRole::Model);
        assert_eq!(mesh.material.opacity, 1.0);
        assert_eq!(mesh.geometry.triangle_count(), 1);

        let bounds = mesh.geometry.bounding_box().unwrap();
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(ModelAsset::from_json(r#"{"name": "x"}"#).is_err());
        assert!(ModelAsset::from_json("not json").is_err());
    }
}
