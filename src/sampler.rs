//! Per-pixel anti-aliasing: jittered samples, accumulation and packing.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::config::RenderSettings;
use crate::scene::Sphere;
use crate::shader::ray_color;
use crate::util::{color, math};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JitterMode {
    /// Sub-pixel offsets from the sine hash.
    #[default]
    Hash,
    /// Zero offset, every sample hits the pixel corner.
    Disabled,
}

impl JitterMode {
    pub fn offset(self, seed: Vec2) -> f32 {
        match self {
            Self::Hash => math::rand(seed),
            Self::Disabled => 0.0,
        }
    }

    pub fn as_u32(self) -> u32 {
        match self {
            Self::Hash => 0,
            Self::Disabled => 1,
        }
    }
}

/// Maps pixel `p` plus its jitter onto `[0, 1]` across `extent - 1` steps.
/// A single row or column has no span and sits on the viewport center.
#[inline]
fn image_coord(p: u32, offset: f32, extent: u32) -> f32 {
    if extent < 2 {
        return 0.5;
    }
    (p as f32 + offset) / (extent - 1) as f32
}

/// Image-plane coordinates of `sample` for pixel `(x, y)`. Pixel centers run
/// from 0 to 1 across `width - 1` steps, so a jittered last column lands
/// slightly past the viewport edge.
pub fn sample_uv(
    x: u32,
    y: u32,
    sample: u32,
    width: u32,
    height: u32,
    jitter: JitterMode,
) -> Vec2 {
    let jx = jitter.offset(Vec2::new(x.wrapping_mul(sample) as f32, x as f32));
    let jy = jitter.offset(Vec2::new(y as f32, y.wrapping_mul(sample) as f32));
    Vec2::new(image_coord(x, jx, width), image_coord(y, jy, height))
}

/// Sum of the shaded colors of every sample of pixel `(x, y)`.
pub fn accumulate(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    spheres: &[Sphere],
    camera: &Camera,
    settings: &RenderSettings,
) -> Vec3 {
    (0..settings.samples).fold(Vec3::ZERO, |sum, sample| {
        let uv = sample_uv(x, y, sample, width, height, settings.jitter);
        let ray = camera.get_ray(uv.x, uv.y);
        sum + ray_color(&ray, spheres, settings)
    })
}

/// Averaged, clamped and packed color of pixel `(x, y)`.
pub fn sample_pixel(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    spheres: &[Sphere],
    camera: &Camera,
    settings: &RenderSettings,
) -> u32 {
    let sum = accumulate(x, y, width, height, spheres, camera, settings);
    color::pack(color::resolve(sum, settings.samples))
}
