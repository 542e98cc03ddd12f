//! 场景图系统模块
//!
//! 管理机器人模型所在的场景层级结构和组件：
//! - Node: 场景节点（支持父子关系和变换）
//! - Transform: 变换组件（位置、旋转、缩放）
//! - Scene: 场景容器（节点、网格、相机）
//! - Camera: 相机组件（投影与拾取射线）
//! - transform_system: 解耦的世界矩阵更新

pub mod camera;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

// 重新导出常用类型
pub use camera::Camera;
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
}
