//! Browser entry point.
//!
//! [`WebViewer`] is the handle the page script holds. Model decoding and
//! GPU drawing stay on the JS side: the page supplies a loader and a
//! renderer callback, forwards native host messages to
//! [`WebViewer::dispatch_json`] and calls [`WebViewer::frame`] from
//! `requestAnimationFrame`.
//!
//! ```js
//! const viewer = new WebViewer("", loadModelJson, drawFrame, null);
//! function tick(ts) { if (viewer.frame(ts)) requestAnimationFrame(tick); }
//! window.rigview = (message) => { viewer.dispatchJson(message); requestAnimationFrame(tick); };
//! ```

use futures::FutureExt;
use glam::{Mat4, Vec3};
use image::RgbaImage;
use js_sys::{Array, Float32Array, Function, Object, Promise, Reflect, Uint8Array};
use slotmap::{Key, KeyData};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::app::backend::{HeadlessBackend, RenderBackend};
use crate::app::settings::ViewerSettings;
use crate::app::viewer::Viewer;
use crate::assets::{AssetLoader, LoadFuture, ModelAsset};
use crate::errors::{Result, RigError};
use crate::host::detect_sink;
use crate::resources::MeshRole;
use crate::scene::{Camera, NodeHandle, Scene};

// ============================================================================
// Loader
// ============================================================================

/// `load(name)` returns model JSON (see [`ModelAsset::from_json`]) or a
/// promise of it.
struct JsAssetLoader {
    load: Function,
}

impl AssetLoader for JsAssetLoader {
    fn load(&self, name: &str) -> LoadFuture {
        let asset = name.to_string();
        let called = self.load.call1(&JsValue::NULL, &JsValue::from_str(name));
        async move {
            let fail = |reason: String| RigError::AssetLoadFailure {
                asset: asset.clone(),
                reason,
            };
            let value = called.map_err(|e| fail(format!("{e:?}")))?;
            let value = JsFuture::from(Promise::resolve(&value))
                .await
                .map_err(|e| fail(format!("{e:?}")))?;
            let text = value
                .as_string()
                .ok_or_else(|| fail("expected model JSON text".to_string()))?;
            ModelAsset::from_json(&text).map_err(|e| fail(e.to_string()))
        }
        .boxed_local()
    }
}

// ============================================================================
// Backend
// ============================================================================

/// Hands each frame to `render(frame)`. Snapshots go to
/// `capture(frame, width, height)`, which returns RGBA bytes; without it the
/// headless vertex cloud is used.
struct JsBackend {
    render: Function,
    capture: Option<Function>,
    fallback: HeadlessBackend,
}

impl RenderBackend for JsBackend {
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()> {
        let frame = describe_frame(scene, camera).map_err(js_render_error)?;
        self.render.call1(&JsValue::NULL, &frame).map_err(js_render_error)?;
        Ok(())
    }

    fn render_offscreen(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        let Some(capture) = &self.capture else {
            return self.fallback.render_offscreen(scene, camera, width, height);
        };
        let frame = describe_frame(scene, camera).map_err(js_render_error)?;
        let pixels = capture
            .call3(&JsValue::NULL, &frame, &JsValue::from(width), &JsValue::from(height))
            .map_err(js_render_error)?
            .dyn_into::<Uint8Array>()
            .map_err(|_| RigError::Render("capture must return a Uint8Array".to_string()))?;
        let len = pixels.length();
        RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or_else(|| {
            RigError::Render(format!("capture returned {len} bytes for {width}x{height}"))
        })
    }
}

#[allow(clippy::needless_pass_by_value)]
fn js_render_error(err: JsValue) -> RigError {
    RigError::Render(format!("{err:?}"))
}

fn set(target: &Object, key: &str, value: &JsValue) -> std::result::Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(drop)
}

fn vec3(v: Vec3) -> JsValue {
    Float32Array::from(&v.to_array()[..]).into()
}

fn mesh_id(handle: NodeHandle) -> f64 {
    handle.data().as_ffi() as f64
}

/// `{ viewProjection, cameraPosition, background, draws: [{ id, name, role,
/// matrix, color, emissive, opacity }] }`, matrices column-major.
fn describe_frame(scene: &Scene, camera: &Camera) -> std::result::Result<Object, JsValue> {
    let frame = Object::new();
    let view_projection = camera.view_projection_matrix().to_cols_array();
    set(&frame, "viewProjection", &Float32Array::from(&view_projection[..]).into())?;
    set(&frame, "cameraPosition", &vec3(camera.world_position()))?;
    set(&frame, "background", &Float32Array::from(&scene.background.to_array()[..]).into())?;

    let draws = Array::new();
    for (handle, node) in &scene.nodes {
        let Some(mesh) = scene.mesh_of(handle) else {
            continue;
        };
        if !mesh.visible || !scene.is_visible_in_tree(handle) {
            continue;
        }
        let draw = Object::new();
        let role = match mesh.role {
            MeshRole::Model => "model",
            MeshRole::Helper => "helper",
        };
        set(&draw, "id", &JsValue::from_f64(mesh_id(handle)))?;
        set(&draw, "name", &JsValue::from_str(&node.name))?;
        set(&draw, "role", &JsValue::from_str(role))?;
        let matrix = Mat4::from(*node.world_matrix()).to_cols_array();
        set(&draw, "matrix", &Float32Array::from(&matrix[..]).into())?;
        set(&draw, "color", &vec3(mesh.material.color))?;
        set(&draw, "emissive", &vec3(mesh.material.emissive))?;
        set(&draw, "opacity", &JsValue::from_f64(f64::from(mesh.material.opacity)))?;
        draws.push(&draw);
    }
    set(&frame, "draws", &draws)?;
    Ok(frame)
}

// ============================================================================
// Handle
// ============================================================================

#[wasm_bindgen]
pub struct WebViewer {
    inner: Viewer<Box<dyn RenderBackend>>,
}

#[wasm_bindgen]
impl WebViewer {
    /// `settings` is [`ViewerSettings`] JSON; an empty string means
    /// defaults. Host events go to the bridge found by [`detect_sink`].
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings: &str,
        load: Function,
        render: Function,
        capture: Option<Function>,
    ) -> std::result::Result<WebViewer, JsError> {
        let settings = if settings.trim().is_empty() {
            ViewerSettings::default()
        } else {
            ViewerSettings::from_json(settings)?
        };
        let backend: Box<dyn RenderBackend> = Box::new(JsBackend {
            render,
            capture,
            fallback: HeadlessBackend::new(),
        });
        let inner = Viewer::new(settings, &JsAssetLoader { load }, backend, detect_sink())?;
        Ok(Self { inner })
    }

    /// Call from every animation frame; schedule another while it returns
    /// `true`.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        self.inner.frame(timestamp_ms)
    }

    #[wasm_bindgen(js_name = wantsNextFrame)]
    pub fn wants_next_frame(&self) -> bool {
        self.inner.wants_next_frame()
    }

    /// One host message, e.g. `{"method":"setPose","angles":[...]}`.
    /// Failures are also reported to the host as a `log` event.
    #[wasm_bindgen(js_name = dispatchJson)]
    pub fn dispatch_json(&mut self, message: &str) -> std::result::Result<(), JsError> {
        self.inner.dispatch_json(message)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setPose)]
    pub fn set_pose(&mut self, angles: &[f32]) -> std::result::Result<(), JsError> {
        self.inner.set_pose(angles)?;
        Ok(())
    }

    /// Picks at CSS pixel coordinates. Returns the pose index of the
    /// selected joint, if any.
    pub fn tap(&mut self, x: f32, y: f32) -> Option<u32> {
        self.inner.tap(x, y)?.pose_index().map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.inner.pointer_move(x, y);
    }

    pub fn scroll(&mut self, delta: f32) {
        self.inner.scroll(delta);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }

    #[wasm_bindgen(js_name = startInteraction)]
    pub fn start_interaction(&mut self) {
        self.inner.start_interaction();
    }

    #[wasm_bindgen(js_name = endInteraction)]
    pub fn end_interaction(&mut self) {
        self.inner.end_interaction();
    }

    /// Base64 PNG; also sent to the host.
    pub fn snapshot(&mut self) -> std::result::Result<String, JsError> {
        Ok(self.inner.request_snapshot()?)
    }

    /// Flat `[x, y, z, ...]` triangle list of the mesh drawn as `id`, for
    /// renderers that upload helper geometry lazily.
    pub fn geometry(&self, id: f64) -> Option<Float32Array> {
        let handle = NodeHandle::from(KeyData::from_ffi(id as u64));
        let mesh = self.inner.scene().mesh_of(handle)?;
        let flat: Vec<f32> = mesh
            .geometry
            .triangles()
            .flatten()
            .flat_map(|v| v.to_array())
            .collect();
        Some(Float32Array::from(&flat[..]))
    }
}
