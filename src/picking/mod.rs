//! Picking & Selection
//!
//! Screen taps become world rays, the nearest mesh hit is resolved to its
//! owning joint, and the selection highlight plus rotation gizmo follow.

pub mod gizmo;
pub mod raycaster;
pub mod selection;

pub use gizmo::{GIZMO_NAME, GizmoFamily, build_gizmo};
pub use raycaster::{Intersection, Ray, Raycaster};
pub use selection::{PickTarget, SelectionState, resolve_hit};

use glam::Vec2;

/// Screen pixels to normalized device coordinates, `y` up.
#[must_use]
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}
