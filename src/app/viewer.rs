//! Viewer Core Module
//!
//! [`Viewer`] is the single context object the host talks to. It owns the
//! scene, the robot rig, selection and load state, the orbit camera and a
//! [`HostSink`] for outbound events. Rendering is delegated to a
//! [`RenderBackend`].
//!
//! # Lifecycle
//!
//! 1. Create with [`Viewer::new`]; pivots exist immediately, visuals load
//!    in the background
//! 2. Call [`Viewer::frame`] from every animation frame until it returns
//!    `false`; it drives loading and presents when ready
//! 3. Send the first pose with [`Viewer::set_pose`]; nothing is presented
//!    before that, and the first presented frame sends `Loaded`
//!
//! ```rust,ignore
//! let settings = ViewerSettings::default();
//! let mut viewer = Viewer::new(settings, &loader, HeadlessBackend::new(), detect_sink())?;
//! viewer.set_pose(&[0.0; 18])?;
//! while viewer.frame(now_ms()) {}
//! ```

use glam::{Vec2, Vec3};

use crate::app::backend::RenderBackend;
use crate::app::input::Input;
use crate::app::lifecycle::{LoadState, RenderLoop};
use crate::app::settings::ViewerSettings;
use crate::app::snapshot;
use crate::assets::{AssetLoader, PendingLoads};
use crate::errors::{Result, RigError};
use crate::host::{HostCommand, HostEvent, HostSink, JointRef};
use crate::picking::{Raycaster, SelectionState, resolve_hit};
use crate::resources::hex_color;
use crate::rig::{JointId, Rig, RigBuilder};
use crate::scene::{Camera, NodeHandle, Scene};
use crate::utils::{OrbitControls, Timer};

/// Interactive robot viewer.
pub struct Viewer<B: RenderBackend> {
    settings: ViewerSettings,
    scene: Scene,
    rig: Rig,
    pending: PendingLoads<JointId>,
    selection: SelectionState,
    load: LoadState,
    render_loop: RenderLoop,
    orbit: OrbitControls,
    timer: Timer,
    input: Input,
    camera: NodeHandle,
    highlight: Vec3,
    backend: B,
    sink: Box<dyn HostSink>,
}

impl<B: RenderBackend> Viewer<B> {
    /// Builds the scene and the rig and starts every asset load.
    ///
    /// # Errors
    ///
    /// Only when the joint registry is not a valid tree.
    pub fn new(
        settings: ViewerSettings,
        loader: &dyn AssetLoader,
        backend: B,
        sink: Box<dyn HostSink>,
    ) -> Result<Self> {
        let mut scene = Scene::new();
        scene.background = hex_color(settings.background).extend(1.0);

        let cam = &settings.camera;
        let camera = scene.add_camera(Camera::new_perspective(
            cam.fov,
            settings.aspect(),
            cam.near,
            cam.far,
        ));
        scene.active_camera = Some(camera);

        let mut orbit =
            OrbitControls::from_position(settings.camera_position(), settings.orbit_target())
                .with_distance_limits(settings.orbit.min_distance, settings.orbit.max_distance);
        orbit.enable_damping = settings.orbit.damping;
        if let Some(node) = scene.get_node_mut(camera) {
            node.transform.position = orbit.position();
            node.transform.look_at(orbit.center, Vec3::Y);
        }

        let (rig, pending) = RigBuilder::new(loader)
            .with_asset_scale(settings.asset_scale)
            .build(&mut scene)?;
        let load = LoadState::new(pending.total());

        scene.update_matrix_world();
        log::info!("Viewer created ({}x{})", settings.width, settings.height);

        Ok(Self {
            input: Input::new(settings.width, settings.height),
            highlight: hex_color(settings.highlight),
            settings,
            scene,
            rig,
            pending,
            selection: SelectionState::new(),
            load,
            render_loop: RenderLoop::new(),
            orbit,
            timer: Timer::new(),
            camera,
            backend,
            sink,
        })
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Per-animation-frame callback. Returns whether another frame should
    /// be scheduled.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        self.timer.tick(timestamp_ms);
        self.poll_loading();

        if self.render_loop.interaction_active() {
            self.update_orbit();
        }
        self.input.end_frame();

        self.render_now();
        self.wants_next_frame()
    }

    #[must_use]
    pub fn wants_next_frame(&self) -> bool {
        self.render_loop.wants_next_frame(&self.load)
    }

    /// Attaches every asset that finished loading since the last call.
    /// Returns how many settled.
    pub fn poll_loading(&mut self) -> usize {
        let settled = self.pending.poll_ready();
        let count = settled.len();

        for (id, result) in settled {
            match result {
                Ok(asset) => {
                    self.rig.attach_visual(&mut self.scene, id, asset);
                    self.load.assets_loaded += 1;
                }
                Err(err) => {
                    self.rig.mark_visual_failed(id);
                    self.load.assets_failed += 1;
                    self.diagnostic(&err);
                }
            }
            self.sink.notify(HostEvent::LoadingProgress(self.load.progress_percent()));
        }

        if self.load.all_settled() && !self.load.tree_ready_sent {
            self.load.tree_ready_sent = true;
            log::info!(
                "All {} assets settled ({} failed) after {:?}",
                self.load.assets_total,
                self.load.assets_failed,
                self.timer.wall_elapsed()
            );
            self.sink.notify(HostEvent::Ready);
        }
        count
    }

    /// Updates world matrices and presents one frame if the viewer is
    /// ready. Returns whether a frame was presented.
    pub fn render_now(&mut self) -> bool {
        self.scene.update_matrix_world();
        if !self.load.ready {
            return false;
        }
        let Some(camera) = self.scene.main_camera() else {
            return false;
        };
        if let Err(err) = self.backend.render(&self.scene, camera) {
            self.diagnostic(&err);
            return false;
        }
        if self.load.mark_rendered() {
            log::info!("First frame presented");
            self.sink.notify(HostEvent::Loaded);
        }
        true
    }

    fn update_orbit(&mut self) {
        let dt = self.timer.dt_seconds();
        if let Some(node) = self.scene.get_node_mut(self.camera) {
            self.orbit.update(&mut node.transform, &self.input, dt);
        }
    }

    // ========================================================================
    // Pose
    // ========================================================================

    /// Applies a full pose. The first success makes the viewer ready.
    ///
    /// Any selection is cleared (the host is told `None`).
    pub fn set_pose(&mut self, angles: &[f32]) -> Result<()> {
        if let Err(err) = self.rig.set_pose(&mut self.scene, angles) {
            self.diagnostic(&err);
            return Err(err);
        }
        if self.selection.clear(&mut self.scene, &self.rig) {
            self.sink.notify(HostEvent::SelectionChanged(None));
        }
        if self.load.mark_ready() {
            log::info!("First pose received, viewer ready");
        }
        self.render_now();
        Ok(())
    }

    /// Sets one joint by short code (`"LSH"`).
    pub fn set_single_joint_angle(&mut self, code: &str, degrees: f32) -> Result<JointId> {
        let result = self.rig.set_joint_angle_by_code(&mut self.scene, code, degrees);
        self.after_joint_change(result)
    }

    /// Sets one joint by index in pose order.
    pub fn set_joint_angle_by_index(&mut self, index: usize, degrees: f32) -> Result<JointId> {
        let result = self.rig.set_joint_angle_by_index(&mut self.scene, index, degrees);
        self.after_joint_change(result)
    }

    /// Sets the angle of the selected joint. `Ok(None)` when nothing is
    /// selected.
    pub fn set_selected_joint_angle(&mut self, degrees: f32) -> Result<Option<JointId>> {
        let Some(id) = self.selection.selected() else {
            self.diagnostic(&RigError::InvalidJoint("no joint selected".to_string()));
            return Ok(None);
        };
        let result = self.rig.set_joint_angle_by_code(&mut self.scene, id.code(), degrees);
        self.after_joint_change(result).map(Some)
    }

    fn after_joint_change(&mut self, result: Result<JointId>) -> Result<JointId> {
        match result {
            Ok(id) => {
                self.render_now();
                Ok(id)
            }
            Err(err) => {
                self.diagnostic(&err);
                Err(err)
            }
        }
    }

    // ========================================================================
    // Interaction & picking
    // ========================================================================

    /// Touch or orbit drag began: render continuously until it ends.
    pub fn start_interaction(&mut self) {
        self.render_loop.set_interaction(true);
        self.input.begin_drag();
        self.render_now();
    }

    pub fn end_interaction(&mut self) {
        self.render_loop.set_interaction(false);
        self.input.end_drag();
        self.render_now();
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.handle_pointer_move(x, y);
    }

    /// Zooms immediately; positive `delta` moves closer.
    pub fn scroll(&mut self, delta: f32) {
        self.input.handle_scroll(delta);
        self.update_orbit();
        self.input.end_frame();
        self.render_now();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.settings.width = width.max(1);
        self.settings.height = height.max(1);
        self.input.handle_resize(width, height);
        let aspect = self.settings.aspect();
        if let Some((_, camera)) = self.scene.query_main_camera_bundle() {
            camera.aspect = aspect;
            camera.update_projection_matrix();
        }
        self.render_now();
    }

    /// Picks at a pixel position and updates the selection. Returns the
    /// selection afterwards.
    pub fn tap(&mut self, x: f32, y: f32) -> Option<JointId> {
        let ndc = self.input.to_ndc(x, y);
        self.pick_ndc(ndc)
    }

    /// Like [`Viewer::tap`] with normalized device coordinates.
    pub fn pick_ndc(&mut self, ndc: Vec2) -> Option<JointId> {
        self.scene.update_matrix_world();
        let Some(camera) = self.scene.main_camera() else {
            return self.selection.selected();
        };
        let hit =
            Raycaster::from_camera(ndc, camera).intersect_subtree(&self.scene, self.rig.root());
        let target = resolve_hit(&self.scene, &self.rig, hit.as_ref());

        if self.selection.apply(&mut self.scene, &self.rig, target, self.highlight) {
            let index = self.selection.selected().and_then(JointId::pose_index);
            self.sink.notify(HostEvent::SelectionChanged(index));
        }
        self.render_now();
        self.selection.selected()
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Renders a square capture from the current camera position and sends
    /// it to the host as base64 PNG. The base64 text is also returned.
    pub fn request_snapshot(&mut self) -> Result<String> {
        match self.snapshot() {
            Ok(b64) => {
                self.sink.notify(HostEvent::SnapshotReady(b64.clone()));
                Ok(b64)
            }
            Err(err) => {
                self.diagnostic(&err);
                Err(err)
            }
        }
    }

    fn snapshot(&mut self) -> Result<String> {
        self.scene.update_matrix_world();
        let position = self
            .scene
            .main_camera()
            .map_or_else(|| self.settings.camera_position(), Camera::world_position);

        let shot = &self.settings.snapshot;
        let camera = snapshot::capture_camera(
            position,
            Vec3::from_array(shot.look_at),
            shot.fov,
            self.settings.camera.near,
            self.settings.camera.far,
            shot.width.max(1) as f32 / shot.height.max(1) as f32,
        );
        let image = self.backend.render_offscreen(&self.scene, &camera, shot.width, shot.height)?;
        snapshot::encode_png_base64(&image)
    }

    // ========================================================================
    // Host commands
    // ========================================================================

    pub fn dispatch(&mut self, command: HostCommand) -> Result<()> {
        log::debug!("Host command: {command:?}");
        match command {
            HostCommand::SetPose { angles } => self.set_pose(&angles),
            HostCommand::SetJointAngle { joint, degrees } => match joint {
                JointRef::Code(code) => self.set_single_joint_angle(&code, degrees).map(drop),
                JointRef::Index(index) => self.set_joint_angle_by_index(index, degrees).map(drop),
            },
            HostCommand::SetSelectedJointAngle { degrees } => {
                self.set_selected_joint_angle(degrees).map(drop)
            }
            HostCommand::StartInteraction => {
                self.start_interaction();
                Ok(())
            }
            HostCommand::EndInteraction => {
                self.end_interaction();
                Ok(())
            }
            HostCommand::Snapshot => self.request_snapshot().map(drop),
            HostCommand::Tap { x, y } => {
                self.tap(x, y);
                Ok(())
            }
            HostCommand::PointerMove { x, y } => {
                self.pointer_move(x, y);
                Ok(())
            }
            HostCommand::Scroll { delta } => {
                self.scroll(delta);
                Ok(())
            }
            HostCommand::Resize { width, height } => {
                self.resize(width, height);
                Ok(())
            }
        }
    }

    /// Parses and dispatches one JSON command.
    pub fn dispatch_json(&mut self, text: &str) -> Result<()> {
        match HostCommand::from_json(text) {
            Ok(command) => self.dispatch(command),
            Err(err) => {
                self.diagnostic(&err);
                Err(err)
            }
        }
    }

    fn diagnostic(&self, err: &RigError) {
        log::warn!("{err}");
        self.sink.notify(HostEvent::Log(err.to_string()));
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    #[must_use]
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    #[inline]
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[inline]
    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    #[must_use]
    pub fn camera(&self) -> Option<&Camera> {
        self.scene.main_camera()
    }

    #[must_use]
    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
