use glam::Vec3;

use crate::config::RenderSettings;
use crate::hit::{nearest_hit, HitRecord};
use crate::ray::Ray;
use crate::scene::Sphere;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShadingMode {
    /// Every pixel gets the background color.
    Constant,
    /// Hit color on any intersection, background otherwise.
    HitMask,
    /// Surface normal mapped from `[-1, 1]` to `[0, 1]`.
    #[default]
    Normal,
}

impl ShadingMode {
    pub fn as_u32(self) -> u32 {
        match self {
            Self::Constant => 0,
            Self::HitMask => 1,
            Self::Normal => 2,
        }
    }
}

pub fn shade(hit: Option<&HitRecord>, settings: &RenderSettings) -> Vec3 {
    match (settings.shading, hit) {
        (ShadingMode::Constant, _) | (_, None) => settings.background,
        (ShadingMode::HitMask, Some(_)) => settings.hit_color,
        (ShadingMode::Normal, Some(hit)) => (hit.normal.normalize() + 1.0) / 2.0,
    }
}

pub fn ray_color(ray: &Ray, spheres: &[Sphere], settings: &RenderSettings) -> Vec3 {
    if settings.shading == ShadingMode::Constant {
        return settings.background;
    }
    let hit = nearest_hit(spheres, ray, settings.t_min, settings.t_max);
    shade(hit.as_ref().map(|(_, record)| record), settings)
}
