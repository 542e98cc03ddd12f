use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 面剔除模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// 材质参数
///
/// 渲染由外部后端完成，这里只记录查看器会修改或需要传递的参数。
/// `emissive` 用于选中高亮：黑色表示无高亮。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
}

impl Material {
    #[must_use]
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// 半透明、双面的辅助材质（轴向指示器使用）
    #[must_use]
    pub fn helper(color: Vec3, opacity: f32) -> Self {
        Self {
            color,
            emissive: Vec3::ZERO,
            opacity,
            transparent: true,
            side: Side::Double,
        }
    }

    #[must_use]
    pub fn is_emissive(&self) -> bool {
        self.emissive != Vec3::ZERO
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
        }
    }
}

/// 0xRRGGBB -> 线性 [0, 1] 分量（不做色彩空间转换）
#[must_use]
pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}
