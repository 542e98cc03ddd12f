use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::rig::builder::DEFAULT_ASSET_SCALE;

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Perspective camera parameters. `fov` is vertical, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.01,
            far: 100.0,
            position: [0.0, 0.0, 25.0],
        }
    }
}

// ---------------------------------------------------------------------------
// Orbit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: bool,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            target: [0.0, -4.0, 0.0],
            min_distance: 14.0,
            max_distance: 30.0,
            damping: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Offscreen capture camera. Placed at the live camera's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub look_at: [f32; 3],
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            fov: 75.0,
            look_at: [0.0, -3.0, 0.0],
        }
    }
}

// ---------------------------------------------------------------------------
// ViewerSettings
// ---------------------------------------------------------------------------

/// Configuration consumed once by [`Viewer::new`](crate::app::Viewer::new).
///
/// | Field         | Description                             | Default         |
/// |---------------|-----------------------------------------|-----------------|
/// | `width`       | Viewport width in pixels                | `800`           |
/// | `height`      | Viewport height in pixels               | `600`           |
/// | `camera`      | Live camera                             | fov 60, z = 25  |
/// | `orbit`       | Orbit target and distance limits        | (0,-4,0), 14-30 |
/// | `snapshot`    | Offscreen capture                       | 500x500, fov 75 |
/// | `asset_scale` | Uniform scale of every joint visual     | `100`           |
/// | `highlight`   | Emissive color of the selected joint    | `0x00FF00`      |
/// | `background`  | Clear color                             | white           |
///
/// Every field is optional in JSON:
///
/// ```rust,ignore
/// let settings = ViewerSettings::from_json(r#"{"width": 390, "height": 844}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub width: u32,
    pub height: u32,
    pub camera: CameraSettings,
    pub orbit: OrbitSettings,
    pub snapshot: SnapshotSettings,
    pub asset_scale: f32,
    /// 0xRRGGBB
    pub highlight: u32,
    /// 0xRRGGBB
    pub background: u32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            camera: CameraSettings::default(),
            orbit: OrbitSettings::default(),
            snapshot: SnapshotSettings::default(),
            asset_scale: DEFAULT_ASSET_SCALE,
            highlight: 0x00FF00,
            background: 0xFFFFFF,
        }
    }
}

impl ViewerSettings {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    #[must_use]
    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera.position)
    }

    #[must_use]
    pub fn orbit_target(&self) -> Vec3 {
        Vec3::from_array(self.orbit.target)
    }
}
