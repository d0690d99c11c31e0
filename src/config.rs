use glam::Vec3;

use crate::sampler::JitterMode;
use crate::shader::ShadingMode;

pub const DEFAULT_SAMPLES: u32 = 10;
pub const DEFAULT_WORKGROUP_SIZE: u32 = 48;
pub const DEFAULT_T_MIN: f32 = 0.0;
pub const DEFAULT_T_MAX: f32 = 100.0;
pub const DEFAULT_BACKGROUND: Vec3 = Vec3::new(0.0, 0.8, 1.0);

/// Per-invocation kernel configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub samples: u32,
    /// Units per dispatch group. Scheduling granularity only, results do
    /// not depend on it.
    pub workgroup_size: u32,
    pub shading: ShadingMode,
    pub jitter: JitterMode,
    pub background: Vec3,
    pub hit_color: Vec3,
    pub t_min: f32,
    pub t_max: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            workgroup_size: DEFAULT_WORKGROUP_SIZE,
            shading: ShadingMode::default(),
            jitter: JitterMode::default(),
            background: DEFAULT_BACKGROUND,
            hit_color: Vec3::ONE,
            t_min: DEFAULT_T_MIN,
            t_max: DEFAULT_T_MAX,
        }
    }
}

impl RenderSettings {
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_jitter(mut self, jitter: JitterMode) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_shading(mut self, shading: ShadingMode) -> Self {
        self.shading = shading;
        self
    }

    pub fn with_workgroup_size(mut self, workgroup_size: u32) -> Self {
        self.workgroup_size = workgroup_size;
        self
    }
}
