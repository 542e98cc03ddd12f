use glam::Vec4;
use slotmap::SlotMap;

use crate::resources::mesh::Mesh;
use crate::scene::camera::Camera;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::transform_system;
use crate::scene::{CameraKey, MeshKey, NodeHandle};

/// 场景图结构
///
/// Scene 是纯数据层：节点层级、网格组件与相机组件。
/// 渲染后端只读访问；查看器在同一线程内修改。
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ====组件池====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SlotMap<CameraKey, Camera>,

    /// 背景清屏颜色 (RGBA)
    pub background: Vec4,

    pub active_camera: Option<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            background: Vec4::ONE,
            active_camera: None,
        }
    }

    // ========================================================================
    // 节点管理
    // ========================================================================

    /// 添加一个节点到场景根部
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// 添加节点并挂到指定父节点下；父节点不存在时放在根部
    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("Parent node not found, adding '{}' as root", child.name);
            return self.add_node(child);
        }
        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        self.nodes[parent].children.push(handle);
        handle
    }

    /// 建立父子关系 (Attach)
    ///
    /// 会从旧父节点（或根列表）中移除。挂到自身或自身子孙下会被拒绝。
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent || self.is_ancestor_of(child, parent) {
            log::warn!("Cannot attach node under itself or its descendant");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Node not found during attach");
            return;
        }

        self.unlink(child);

        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.transform.mark_dirty();
    }

    /// 从父节点摘下，放回根列表
    pub fn detach(&mut self, child: NodeHandle) {
        if !self.nodes.contains_key(child) {
            return;
        }
        self.unlink(child);
        self.nodes[child].parent = None;
        self.nodes[child].transform.mark_dirty();
        self.root_nodes.push(child);
    }

    fn unlink(&mut self, child: NodeHandle) {
        match self.nodes.get(child).and_then(|n| n.parent) {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(p) {
                    parent.children.retain(|c| *c != child);
                }
            }
            None => self.root_nodes.retain(|r| *r != child),
        }
    }

    /// 移除节点 (递归移除所有子节点及其组件)
    pub fn remove_node(&mut self, handle: NodeHandle) {
        if !self.nodes.contains_key(handle) {
            return;
        }
        self.unlink(handle);

        for h in self.traverse(handle) {
            if let Some(node) = self.nodes.remove(h) {
                if let Some(mesh) = node.mesh {
                    self.meshes.remove(mesh);
                }
                if let Some(camera) = node.camera {
                    self.cameras.remove(camera);
                }
            }
        }

        if self.active_camera == Some(handle) {
            self.active_camera = None;
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    // ========================================================================
    // 层级查询
    // ========================================================================

    /// 深度优先前序遍历子树（包含 root 本身）
    #[must_use]
    pub fn traverse(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(h) = stack.pop() {
            let Some(node) = self.nodes.get(h) else {
                continue;
            };
            out.push(h);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// 沿父链向上的迭代器（不包含起点）
    pub fn ancestors(&self, handle: NodeHandle) -> impl Iterator<Item = NodeHandle> + '_ {
        std::iter::successors(self.nodes.get(handle).and_then(|n| n.parent), move |h| {
            self.nodes.get(*h).and_then(|n| n.parent)
        })
    }

    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeHandle, handle: NodeHandle) -> bool {
        self.ancestors(handle).any(|h| h == ancestor)
    }

    /// 节点及其所有祖先都可见
    #[must_use]
    pub fn is_visible_in_tree(&self, handle: NodeHandle) -> bool {
        self.nodes.get(handle).is_some_and(|n| n.visible)
            && self
                .ancestors(handle)
                .all(|h| self.nodes.get(h).is_some_and(|n| n.visible))
    }

    // ========================================================================
    // 组件 API
    // ========================================================================

    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let mut node = Node::new(mesh.name.clone());
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_to_parent(node, parent)
    }

    #[must_use]
    pub fn mesh_of(&self, handle: NodeHandle) -> Option<&Mesh> {
        let key = self.nodes.get(handle)?.mesh?;
        self.meshes.get(key)
    }

    pub fn mesh_of_mut(&mut self, handle: NodeHandle) -> Option<&mut Mesh> {
        let key = self.nodes.get(handle)?.mesh?;
        self.meshes.get_mut(key)
    }

    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let mut node = Node::new(camera.name.clone());
        node.camera = Some(self.cameras.insert(camera));
        self.add_node(node)
    }

    /// 获取主相机
    #[must_use]
    pub fn main_camera(&self) -> Option<&Camera> {
        let key = self.nodes.get(self.active_camera?)?.camera?;
        self.cameras.get(key)
    }

    /// 获取主相机的 (Transform, Camera) 组合
    pub fn query_main_camera_bundle(&mut self) -> Option<(&mut Transform, &mut Camera)> {
        let node_id = self.active_camera?;
        let camera_key = self.nodes.get(node_id)?.camera?;
        let camera = self.cameras.get_mut(camera_key)?;
        let transform = &mut self.nodes.get_mut(node_id)?.transform;
        Some((transform, camera))
    }

    // ========================================================================
    // 矩阵更新
    // ========================================================================

    /// 更新整个场景的世界矩阵，渲染和拾取之前调用
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(
            &mut self.nodes,
            &mut self.cameras,
            &self.root_nodes,
        );
    }

    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, &mut self.cameras, root);
    }
}
