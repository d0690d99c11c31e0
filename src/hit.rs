//! Ray-sphere intersection.
//!
//! Spheres are tested brute force in scene order. The nearest hit search
//! narrows its upper bound to the closest `t` seen so far, so the retained
//! record is always the nearest one along the ray.

use glam::Vec3;

use crate::ray::Ray;
use crate::scene::Sphere;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub point: Vec3,
    /// Unit length for valid spheres; always opposes the incoming ray.
    pub normal: Vec3,
    pub t: f32,
    /// `true` when the ray approaches from outside the sphere.
    pub front_face: bool,
}

impl HitRecord {
    fn new(ray: &Ray, t: f32, point: Vec3, outward_normal: Vec3) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            point,
            normal,
            t,
            front_face,
        }
    }
}

pub trait Hittable {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord>;
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord> {
        ray_hit(ray, self, t_min, t_max)
    }
}

/// Solves `a*t^2 + 2*half_b*t + c = 0` and returns the smaller root inside
/// `[t_min, t_max]`, falling back to the larger one.
pub fn ray_hit(ray: &Ray, sphere: &Sphere, t_min: f32, t_max: f32) -> Option<HitRecord> {
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let half_b = oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;
    let discriminant = half_b * half_b - a * c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let mut root = (-half_b - sqrtd) / a;
    if root < t_min || t_max < root {
        root = (-half_b + sqrtd) / a;
        if root < t_min || t_max < root {
            return None;
        }
    }

    let point = ray.at(root);
    let outward_normal = (point - sphere.center) / sphere.radius;
    Some(HitRecord::new(ray, root, point, outward_normal))
}

/// Nearest hit across `spheres`, with the index of the sphere that produced
/// it. On an exact tie in `t` the sphere earlier in the slice is kept.
pub fn nearest_hit(
    spheres: &[Sphere],
    ray: &Ray,
    t_min: f32,
    t_max: f32,
) -> Option<(usize, HitRecord)> {
    let mut closest = t_max;
    let mut nearest: Option<(usize, HitRecord)> = None;

    for (index, sphere) in spheres.iter().enumerate() {
        if let Some(record) = sphere.hit(ray, t_min, closest) {
            if nearest.is_none() || record.t < closest {
                closest = record.t;
                nearest = Some((index, record));
            }
        }
    }

    nearest
}
