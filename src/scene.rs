use glam::Vec3;

/// Ordered sphere list plus output image size. Read-only during a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.5,
        }
    }
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            spheres: Vec::new(),
            width,
            height,
        }
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.spheres.push(sphere);
        self
    }

    pub fn push(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// A row of unit-diameter spheres receding along -x, starting below the
    /// origin at `(0, -1, -1)` and spaced 1.5 apart.
    pub fn demo(width: u32, height: u32, count: usize) -> Self {
        let mut scene = Self::new(width, height);
        for i in 0..count {
            let x = if i == 0 { 0.0 } else { -1.0 - i as f32 * 1.5 };
            scene.push(Sphere::new(Vec3::new(x, -1.0, -1.0), 0.5));
        }
        scene
    }
}
