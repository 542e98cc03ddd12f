use glam::{Vec3, Vec4Swizzles};
use image::{Rgba, RgbaImage};

use crate::errors::{Result, RigError};
use crate::scene::{Camera, Scene};

/// The GPU renderer behind the viewer.
///
/// The viewer owns the scene and keeps world and camera matrices current
/// before every call; a backend only reads.
pub trait RenderBackend {
    /// Presents one frame of `scene` seen through `camera`.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()>;

    /// Renders into an offscreen RGBA image of the given size.
    fn render_offscreen(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage>;
}

impl<B: RenderBackend + ?Sized> RenderBackend for Box<B> {
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()> {
        (**self).render(scene, camera)
    }

    fn render_offscreen(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        (**self).render_offscreen(scene, camera, width, height)
    }
}

/// A backend without a GPU.
///
/// Counts presented frames and draws offscreen images as a vertex cloud
/// over the background color, which is enough for tests and for hosts
/// that only need a thumbnail.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    frames: u64,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderBackend for HeadlessBackend {
    fn render(&mut self, _scene: &Scene, _camera: &Camera) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    #[allow(clippy::cast_sign_loss)]
    fn render_offscreen(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        if width == 0 || height == 0 {
            return Err(RigError::Render(format!("invalid target size {width}x{height}")));
        }

        let mut image = RgbaImage::from_pixel(width, height, to_rgba(scene.background.xyz(), 1.0));

        for (handle, node) in &scene.nodes {
            let Some(mesh) = scene.mesh_of(handle) else {
                continue;
            };
            if !mesh.visible || !scene.is_visible_in_tree(handle) {
                continue;
            }
            let material = &mesh.material;
            let color = to_rgba(material.color + material.emissive, material.opacity);
            let world = node.world_matrix();
            for p in &mesh.geometry.positions {
                let ndc = camera.project(world.transform_point3(*p));
                if !(0.0..=1.0).contains(&ndc.z) || ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
                    continue;
                }
                let x = ((ndc.x + 1.0) * 0.5 * (width - 1) as f32).round() as u32;
                let y = ((1.0 - ndc.y) * 0.5 * (height - 1) as f32).round() as u32;
                image.put_pixel(x, y, color);
            }
        }

        Ok(image)
    }
}

#[allow(clippy::cast_sign_loss)]
fn to_rgba(color: Vec3, alpha: f32) -> Rgba<u8> {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Rgba([c.x as u8, c.y as u8, c.z as u8, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8])
}
