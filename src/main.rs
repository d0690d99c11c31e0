use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glam::Vec3;
use sphere_tracer_lib::{
    camera::{CameraController, CameraParams},
    config::{RenderSettings, DEFAULT_SAMPLES, DEFAULT_WORKGROUP_SIZE},
    renderer::{render_frame, save_png, Backend, CpuRenderer},
    sampler::JitterMode,
    scene::Scene,
    shader::ShadingMode,
    RenderError,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendKind {
    Cpu,
    Gpu,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shading {
    Constant,
    HitMask,
    Normal,
}

impl From<Shading> for ShadingMode {
    fn from(shading: Shading) -> Self {
        match shading {
            Shading::Constant => Self::Constant,
            Shading::HitMask => Self::HitMask,
            Shading::Normal => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Jitter {
    Hash,
    Disabled,
}

impl From<Jitter> for JitterMode {
    fn from(jitter: Jitter) -> Self {
        match jitter {
            Jitter::Hash => Self::Hash,
            Jitter::Disabled => Self::Disabled,
        }
    }
}

/// Render a row of spheres to PNG.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Samples per pixel.
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: u32,
    #[arg(long, default_value_t = DEFAULT_WORKGROUP_SIZE)]
    workgroup_size: u32,
    #[arg(long, value_enum, default_value_t = Shading::Normal)]
    shading: Shading,
    #[arg(long, value_enum, default_value_t = Jitter::Hash)]
    jitter: Jitter,
    #[arg(long, default_value_t = 5)]
    spheres: usize,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    camera_x: f32,
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    camera_y: f32,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    camera_z: f32,
    #[arg(long, default_value_t = 2.0)]
    viewport_height: f32,
    #[arg(long, default_value_t = 1.0)]
    focal_length: f32,
    /// Number of frames; the camera moves by `camera_step` along x between frames.
    #[arg(long, default_value_t = 1)]
    frames: u32,
    #[arg(long, default_value_t = -0.01, allow_negative_numbers = true)]
    camera_step: f32,
    /// Worker threads, defaults to one per core.
    #[arg(long)]
    threads: Option<usize>,
    #[arg(long, value_enum, default_value_t = BackendKind::Cpu)]
    backend: BackendKind,
    #[arg(short, long, default_value = "frame.png")]
    output: PathBuf,
}

impl Args {
    fn settings(&self) -> RenderSettings {
        RenderSettings::default()
            .with_samples(self.samples)
            .with_workgroup_size(self.workgroup_size)
            .with_shading(self.shading.into())
            .with_jitter(self.jitter.into())
    }

    fn camera(&self) -> CameraParams {
        CameraParams {
            viewport_height: self.viewport_height,
            focal_length: self.focal_length,
            position: Vec3::new(self.camera_x, self.camera_y, self.camera_z),
        }
    }

    fn backend(&self) -> Result<Box<dyn Backend>, RenderError> {
        match self.backend {
            BackendKind::Cpu => match self.threads {
                Some(threads) => Ok(Box::new(CpuRenderer::with_threads(threads)?)),
                None => Ok(Box::new(CpuRenderer::new())),
            },
            #[cfg(feature = "gpu")]
            BackendKind::Gpu => Ok(Box::new(sphere_tracer_lib::gpu::GpuRenderer::new()?)),
            #[cfg(not(feature = "gpu"))]
            BackendKind::Gpu => Err(RenderError::BackendUnavailable("gpu")),
        }
    }

    /// `frame.png` for a single frame, `frame_0003.png` when animating.
    fn frame_path(&self, frame: u32) -> PathBuf {
        if self.frames <= 1 {
            return self.output.clone();
        }
        let stem = self
            .output
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("frame");
        self.output.with_file_name(format!("{stem}_{frame:04}.png"))
    }
}

fn run(args: &Args) -> Result<(), RenderError> {
    let scene = Scene::demo(args.width, args.height, args.spheres);
    let settings = args.settings();
    let mut camera = args.camera();
    let controller = CameraController::new(Vec3::new(args.camera_step, 0.0, 0.0));
    let mut backend = args.backend()?;

    for frame in 0..args.frames {
        let pixels = render_frame(backend.as_mut(), &scene, &camera, &settings)?;
        let path = args.frame_path(frame);
        save_png(&path, &pixels, scene.width, scene.height)?;
        tracing::info!(frame, path = %path.display(), "frame written");
        controller.advance(&mut camera);
    }
    Ok(())
}

fn main() -> Result<(), RenderError> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let result = run(&args);
    if let Err(e) = &result {
        tracing::error!("{}", e);
    }
    result
}
