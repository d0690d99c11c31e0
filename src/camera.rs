use glam::Vec3;

use crate::ray::Ray;

/// Camera inputs supplied by the caller before an invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub viewport_height: f32,
    pub focal_length: f32,
    pub position: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            viewport_height: 2.0,
            focal_length: 1.0,
            position: Vec3::ZERO,
        }
    }
}

impl CameraParams {
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.position += Vec3::new(x, y, z);
    }
}

/// Ray-generation basis, derived once per invocation from [`CameraParams`]
/// and the image aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin: Vec3,
    pub horizontal: Vec3,
    pub vertical: Vec3,
    pub lower_left_corner: Vec3,
}

impl Camera {
    /// `height` must be non-zero; a zero height yields non-finite extents.
    pub fn new(params: &CameraParams, width: u32, height: u32) -> Self {
        let aspect = width as f32 / height as f32;
        let viewport_width = aspect * params.viewport_height;

        let origin = params.position;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, params.viewport_height, 0.0);
        let lower_left_corner = origin
            - horizontal / 2.0
            - vertical / 2.0
            - Vec3::new(0.0, 0.0, params.focal_length);

        Self {
            origin,
            horizontal,
            vertical,
            lower_left_corner,
        }
    }

    /// Maps `(u, v)` in `[0, 1]` onto the viewport. Coordinates are not
    /// clamped, so jittered values slightly outside the range overshoot the
    /// viewport edge.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let direction =
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin;
        Ray::new(self.origin, direction)
    }
}

/// Moves the camera by a fixed step between frames.
pub struct CameraController {
    pub step: Vec3,
}

impl CameraController {
    pub fn new(step: Vec3) -> Self {
        Self { step }
    }

    pub fn advance(&self, params: &mut CameraParams) {
        params.translate(self.step.x, self.step.y, self.step.z);
        tracing::debug!(position = ?params.position, "camera advanced");
    }
}
