#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod assets;
pub mod errors;
pub mod host;
pub mod picking;
pub mod resources;
pub mod rig;
pub mod scene;
pub mod utils;

pub use app::{HeadlessBackend, RenderBackend, Viewer, ViewerSettings};
pub use assets::{AssetLoader, MemoryAssetLoader, ModelAsset, ModelNode};
pub use errors::{Result, RigError};
pub use host::{HostCommand, HostEvent, HostSink, LogSink, RecordingSink, detect_sink};
pub use resources::{Geometry, Material, Mesh};
pub use rig::{JointId, Pose, Rig};
pub use scene::{Camera, Node, Scene};

#[cfg(target_arch = "wasm32")]
pub use app::WebViewer;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    utils::logging::init(log::Level::Info);
}
