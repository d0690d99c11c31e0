//! Plain-old-data layouts of the kernel's input buffers, as uploaded to a
//! compute device. Field order and padding follow WGSL host-shareable layout
//! rules (`vec3<f32>` is 16-byte aligned).

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::camera::CameraParams;
use crate::config::RenderSettings;
use crate::scene::{Scene, Sphere};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SphereRecord {
    pub center: [f32; 3],
    pub radius: f32,
}

impl From<&Sphere> for SphereRecord {
    fn from(sphere: &Sphere) -> Self {
        Self {
            center: sphere.center.to_array(),
            radius: sphere.radius,
        }
    }
}

impl From<SphereRecord> for Sphere {
    fn from(record: SphereRecord) -> Self {
        Sphere::new(Vec3::from_array(record.center), record.radius)
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraRecord {
    pub position: [f32; 3],
    pub viewport_height: f32,
    pub focal_length: f32,
    pub _padding: [f32; 3],
}

impl From<&CameraParams> for CameraRecord {
    fn from(params: &CameraParams) -> Self {
        Self {
            position: params.position.to_array(),
            viewport_height: params.viewport_height,
            focal_length: params.focal_length,
            _padding: [0.0; 3],
        }
    }
}

impl From<CameraRecord> for CameraParams {
    fn from(record: CameraRecord) -> Self {
        Self {
            viewport_height: record.viewport_height,
            focal_length: record.focal_length,
            position: Vec3::from_array(record.position),
        }
    }
}

/// Image size and kernel settings, one uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct KernelParams {
    pub width: u32,
    pub height: u32,
    pub sphere_count: u32,
    pub samples: u32,
    pub shading: u32,
    pub jitter: u32,
    pub t_min: f32,
    pub t_max: f32,
    pub background: [f32; 4],
    pub hit_color: [f32; 4],
}

impl KernelParams {
    pub fn new(scene: &Scene, settings: &RenderSettings) -> Self {
        Self {
            width: scene.width,
            height: scene.height,
            sphere_count: scene.spheres.len() as u32,
            samples: settings.samples,
            shading: settings.shading.as_u32(),
            jitter: settings.jitter.as_u32(),
            t_min: settings.t_min,
            t_max: settings.t_max,
            background: settings.background.extend(0.0).to_array(),
            hit_color: settings.hit_color.extend(0.0).to_array(),
        }
    }
}

/// Sphere records for upload. Storage bindings may not be empty, so an
/// empty scene yields one zeroed record that `sphere_count` excludes.
pub fn sphere_records(scene: &Scene) -> Vec<SphereRecord> {
    if scene.spheres.is_empty() {
        return vec![SphereRecord::zeroed()];
    }
    scene.spheres.iter().map(SphereRecord::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShadingMode;

    #[test]
    fn record_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<SphereRecord>(), 16);
        assert_eq!(std::mem::size_of::<CameraRecord>(), 32);
        assert_eq!(std::mem::size_of::<KernelParams>(), 64);
    }

    #[test]
    fn sphere_record_bytes() {
        let record = SphereRecord::from(&Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5));
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&record));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5]);
        assert_eq!(Sphere::from(record).center, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn camera_record_keeps_params() {
        let params = CameraParams {
            viewport_height: 3.0,
            focal_length: 1.5,
            position: Vec3::new(0.0, -1.0, 1.0),
        };
        assert_eq!(CameraParams::from(CameraRecord::from(&params)), params);
    }

    #[test]
    fn empty_scene_uploads_placeholder() {
        let scene = Scene::new(8, 8);
        let records = sphere_records(&scene);
        assert_eq!(records.len(), 1);
        let params = KernelParams::new(&scene, &RenderSettings::default());
        assert_eq!(params.sphere_count, 0);
    }

    #[test]
    fn kernel_params_encode_modes() {
        let settings = RenderSettings::default().with_shading(ShadingMode::HitMask);
        let params = KernelParams::new(&Scene::demo(80, 60, 5), &settings);
        assert_eq!(params.sphere_count, 5);
        assert_eq!(params.shading, 1);
        assert_eq!(params.jitter, 0);
        assert_eq!(params.samples, 10);
        assert_eq!(params.background, [0.0, 0.8, 1.0, 0.0]);
    }
}
