//! Headless walkthrough: builds the rig from placeholder boxes, poses it,
//! taps a shoulder and writes a snapshot PNG.
//!
//! `cargo run --example headless -- out.png`

use base64::Engine;
use rigview::host::{HostCommand, LogSink};
use rigview::resources::primitives::create_box;
use rigview::resources::{Material, hex_color};
use rigview::rig::registry;
use rigview::{HeadlessBackend, MemoryAssetLoader, Mesh, ModelAsset, Viewer, ViewerSettings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out = std::env::args().nth(1).unwrap_or_else(|| "snapshot.png".to_string());

    let mut loader = MemoryAssetLoader::new();
    for spec in registry::list_joints() {
        let mesh = Mesh::new(create_box(0.012, 0.012, 0.012), Material::new(hex_color(0x9E9E9E)));
        loader.insert(spec.asset_name, ModelAsset::single_mesh(spec.asset_name, mesh));
    }

    let settings = ViewerSettings::default();
    let mut viewer = Viewer::new(settings, &loader, HeadlessBackend::new(), Box::new(LogSink))?;

    let mut t = 0.0;
    while viewer.frame(t) && !viewer.load_state().all_settled() {
        t += 16.0;
    }

    let mut angles = [0.0_f32; 18];
    angles[0] = 45.0;
    angles[9] = -30.0;
    viewer.dispatch(HostCommand::SetPose { angles: angles.to_vec() })?;
    viewer.dispatch_json(r#"{"method":"setJointAngle","joint":"LKNE","degrees":20}"#)?;

    viewer.dispatch(HostCommand::Tap { x: 460.0, y: 220.0 })?;
    log::info!("Selected after tap: {:?}", viewer.selection().selected());

    let b64 = viewer.request_snapshot()?;
    let png = base64::engine::general_purpose::STANDARD.decode(b64)?;
    std::fs::write(&out, png)?;
    log::info!("Wrote {out} after {} frames", viewer.backend().frames());

    Ok(())
}
