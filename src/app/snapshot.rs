use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use glam::Vec3;
use image::{ImageFormat, RgbaImage};

use crate::errors::Result;
use crate::scene::{Camera, Transform};

/// PNG-encodes `image` and returns it as standard base64.
pub fn encode_png_base64(image: &RgbaImage) -> Result<String> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(STANDARD.encode(bytes.into_inner()))
}

/// Square capture camera at `position` aimed at `target`, with current
/// view and projection matrices.
#[must_use]
pub fn capture_camera(
    position: Vec3,
    target: Vec3,
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
) -> Camera {
    let mut transform = Transform::new();
    transform.position = position;
    transform.look_at(target, Vec3::Y);
    transform.update_local_matrix();

    let mut camera = Camera::new_perspective(fov, aspect, near, far);
    camera.name = "SnapshotCamera".into();
    camera.update_view_projection(transform.local_matrix());
    camera
}
