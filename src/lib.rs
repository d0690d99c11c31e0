//! Data-parallel sphere ray casting.
//!
//! Every pixel of a `width x height` image is an independent unit of work:
//! it casts jittered rays through a pinhole camera, finds the nearest sphere
//! hit, shades it by surface normal (or a background color on a miss),
//! averages the samples and writes one packed `0x00RRGGBB` word to its own
//! output slot. Units share only read-only inputs.

pub mod buffers;
pub mod camera;
pub mod config;
pub mod error;
pub mod hit;
pub mod kernel;
pub mod ray;
pub mod renderer;
pub mod sampler;
pub mod scene;
pub mod shader;
pub mod util;

#[cfg(feature = "gpu")]
pub mod gpu;

pub use camera::{Camera, CameraController, CameraParams};
pub use config::RenderSettings;
pub use error::RenderError;
pub use hit::{nearest_hit, ray_hit, HitRecord, Hittable};
pub use ray::Ray;
pub use renderer::{render_frame, Backend, CpuRenderer};
pub use sampler::JitterMode;
pub use scene::{Scene, Sphere};
pub use shader::ShadingMode;
