//! Work done by a single execution unit: one pixel, one output word.

use crate::camera::Camera;
use crate::config::RenderSettings;
use crate::sampler::sample_pixel;
use crate::scene::Scene;

/// Pixel coordinate owned by unit `index` in a row-major image.
#[inline]
pub fn pixel_coord(index: usize, width: u32) -> (u32, u32) {
    let width = width as usize;
    ((index % width) as u32, (index / width) as u32)
}

/// Packed color for unit `index`. `camera` is derived once per invocation
/// by the dispatcher and shared read-only by every unit.
pub fn trace_pixel(index: usize, scene: &Scene, camera: &Camera, settings: &RenderSettings) -> u32 {
    let (x, y) = pixel_coord(index, scene.width);
    sample_pixel(
        x,
        y,
        scene.width,
        scene.height,
        &scene.spheres,
        camera,
        settings,
    )
}
