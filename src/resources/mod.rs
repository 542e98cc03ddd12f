//! 核心资源定义模块
//!
//! 包含场景使用的 CPU 端数据结构，不依赖于 GPU 实现：
//! - Mesh: 网格对象（几何体 + 材质 + 用途）
//! - Material: 材质参数（颜色、自发光、透明度）
//! - Geometry: 三角形几何数据与包围盒
//! - primitives: 程序化生成的基础形状

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;

// 重新导出常用类型
pub use geometry::{BoundingBox, Geometry};
pub use material::{Material, Side, hex_color};
pub use mesh::{Mesh, MeshRole};
