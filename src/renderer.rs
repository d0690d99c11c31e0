use std::path::Path;
use std::time::Instant;

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::camera::{Camera, CameraParams};
use crate::config::RenderSettings;
use crate::error::RenderError;
use crate::kernel::trace_pixel;
use crate::scene::Scene;
use crate::util::color;

/// Runs the kernel once per pixel of `scene` and fills `output`.
pub trait Backend {
    fn name(&self) -> &'static str;

    /// Overwrites `output[..width * height]`. Slots past the image are left
    /// untouched.
    fn render(
        &mut self,
        scene: &Scene,
        camera: &CameraParams,
        settings: &RenderSettings,
        output: &mut [u32],
    ) -> Result<(), RenderError>;
}

/// Allocates an output buffer sized to the scene and renders into it.
pub fn render_frame<B: Backend + ?Sized>(
    backend: &mut B,
    scene: &Scene,
    camera: &CameraParams,
    settings: &RenderSettings,
) -> Result<Vec<u32>, RenderError> {
    let mut output = vec![0u32; scene.pixel_count()];
    backend.render(scene, camera, settings, &mut output)?;
    Ok(output)
}

/// Guards the inputs the kernel assumes are valid.
pub fn validate(
    scene: &Scene,
    settings: &RenderSettings,
    output_len: usize,
) -> Result<(), RenderError> {
    if scene.width == 0 || scene.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: scene.width,
            height: scene.height,
        });
    }
    let required = scene.pixel_count();
    if output_len < required {
        return Err(RenderError::OutputTooSmall {
            len: output_len,
            required,
        });
    }
    if settings.samples == 0 {
        return Err(RenderError::InvalidSampleCount);
    }
    if settings.workgroup_size == 0 {
        return Err(RenderError::InvalidWorkgroupSize);
    }
    if let Some((index, sphere)) = scene
        .spheres
        .iter()
        .enumerate()
        .find(|(_, sphere)| !(sphere.radius > 0.0 && sphere.radius.is_finite()))
    {
        return Err(RenderError::DegenerateSphere {
            index,
            radius: sphere.radius,
        });
    }
    Ok(())
}

/// Data-parallel CPU dispatch. Pixels are split into groups of
/// `workgroup_size` consecutive indices, each group runs as one rayon task.
#[derive(Default)]
pub struct CpuRenderer {
    pool: Option<rayon::ThreadPool>,
}

impl CpuRenderer {
    /// Uses the global rayon pool.
    pub fn new() -> Self {
        Self { pool: None }
    }

    pub fn with_threads(threads: usize) -> Result<Self, RenderError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("trace-{index}"))
            .build()?;
        Ok(Self { pool: Some(pool) })
    }
}

impl Backend for CpuRenderer {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &CameraParams,
        settings: &RenderSettings,
        output: &mut [u32],
    ) -> Result<(), RenderError> {
        validate(scene, settings, output.len())?;

        tracing::info!(
            backend = self.name(),
            width = scene.width,
            height = scene.height,
            samples = settings.samples,
            spheres = scene.spheres.len(),
            "rendering frame"
        );

        let start = Instant::now();
        let camera = Camera::new(camera, scene.width, scene.height);
        let group_size = settings.workgroup_size as usize;
        let pixels = &mut output[..scene.pixel_count()];

        let mut dispatch = move || {
            pixels
                .par_chunks_mut(group_size)
                .enumerate()
                .for_each(|(group, slots)| {
                    let base = group * group_size;
                    for (local, slot) in slots.iter_mut().enumerate() {
                        *slot = trace_pixel(base + local, scene, &camera, settings);
                    }
                });
        };

        match &self.pool {
            Some(pool) => pool.install(dispatch),
            None => dispatch(),
        }

        tracing::debug!(
            elapsed_ms = start.elapsed().as_secs_f32() * 1000.0,
            "frame rendered"
        );
        Ok(())
    }
}

/// Converts packed words to an RGBA image. Row 0 of the buffer is the bottom
/// of the viewport, so rows are flipped to read upright.
pub fn to_rgba_image(pixels: &[u32], width: u32, height: u32) -> Result<RgbaImage, RenderError> {
    let required = width as usize * height as usize;
    if pixels.len() < required {
        return Err(RenderError::OutputTooSmall {
            len: pixels.len(),
            required,
        });
    }

    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let row = (height - 1 - y) as usize;
        let [r, g, b] = color::unpack(pixels[x as usize + row * width as usize]);
        Rgba([r, g, b, 255])
    }))
}

pub fn save_png(
    path: impl AsRef<Path>,
    pixels: &[u32],
    width: u32,
    height: u32,
) -> Result<(), RenderError> {
    let image = to_rgba_image(pixels, width, height)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
