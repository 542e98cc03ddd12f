//! Viewport & Lifecycle
//!
//! - [`Viewer`]: the context object the host drives
//! - [`RenderBackend`]: GPU rendering seam, with [`HeadlessBackend`]
//! - [`ViewerSettings`]: JSON-loadable configuration
//! - [`LoadState`] / [`RenderLoop`]: readiness and frame scheduling
//! - `WebViewer` (`wasm32` only): the handle page scripts drive

pub mod backend;
pub mod input;
pub mod lifecycle;
pub mod settings;
pub mod snapshot;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use backend::{HeadlessBackend, RenderBackend};
pub use input::Input;
pub use lifecycle::{LoadState, RenderLoop};
pub use settings::{CameraSettings, OrbitSettings, SnapshotSettings, ViewerSettings};
pub use viewer::Viewer;

#[cfg(target_arch = "wasm32")]
pub use web::WebViewer;
