#![allow(dead_code)]

use glam::{Vec2, Vec3};

use rigview::app::{HeadlessBackend, Viewer, ViewerSettings};
use rigview::assets::{MemoryAssetLoader, ModelAsset};
use rigview::host::{HostEvent, RecordingSink};
use rigview::resources::primitives::create_box;
use rigview::resources::{Material, Mesh, hex_color};
use rigview::rig::JointId;
use rigview::rig::registry;

pub const EPSILON: f32 = 1e-5;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

/// A cube of 0.01 asset units: one world unit once the asset scale is applied.
pub fn box_asset(name: &str) -> ModelAsset {
    let mesh = Mesh::new(create_box(0.01, 0.01, 0.01), Material::new(hex_color(0x808080)));
    ModelAsset::single_mesh(name, mesh)
}

/// Serves a cube for every asset name in the registry.
pub fn full_loader() -> MemoryAssetLoader {
    registry::list_joints()
        .iter()
        .fold(MemoryAssetLoader::new(), |loader, spec| {
            loader.with(spec.asset_name, box_asset(spec.asset_name))
        })
}

pub type TestViewer = Viewer<HeadlessBackend>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn new_viewer(loader: &MemoryAssetLoader) -> (TestViewer, RecordingSink) {
    init_logging();
    let sink = RecordingSink::new();
    let viewer = Viewer::new(
        ViewerSettings::default(),
        loader,
        HeadlessBackend::new(),
        Box::new(sink.clone()),
    )
    .unwrap();
    (viewer, sink)
}

/// Every asset loaded, first pose applied, events drained.
pub fn ready_viewer() -> (TestViewer, RecordingSink) {
    let (mut viewer, sink) = new_viewer(&full_loader());
    viewer.poll_loading();
    viewer.set_pose(&[0.0; 18]).unwrap();
    sink.take();
    (viewer, sink)
}

/// NDC of a joint's pivot as seen by the live camera.
pub fn joint_ndc(viewer: &TestViewer, id: JointId) -> Vec2 {
    let pivot = viewer.rig().pivot(id);
    let world: Vec3 = viewer.scene().get_node(pivot).unwrap().world_matrix().translation.into();
    viewer.camera().unwrap().project(world).truncate()
}

pub fn selection_events(events: &[HostEvent]) -> Vec<Option<usize>> {
    events
        .iter()
        .filter_map(|e| match e {
            HostEvent::SelectionChanged(index) => Some(*index),
            _ => None,
        })
        .collect()
}
