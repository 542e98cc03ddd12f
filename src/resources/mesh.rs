use serde::{Deserialize, Serialize};

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;

/// 网格的用途
///
/// 模型网格参与高亮；辅助网格（轴向指示器）不参与高亮，
/// 被拾取命中时也不改变选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshRole {
    #[default]
    Model,
    Helper,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    #[serde(default)]
    pub name: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub role: MeshRole,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material,
            role: MeshRole::Model,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn helper(geometry: Geometry, material: Material) -> Self {
        Self {
            name: "Helper".to_string(),
            geometry,
            material,
            role: MeshRole::Helper,
            visible: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_helper(&self) -> bool {
        self.role == MeshRole::Helper
    }
}
