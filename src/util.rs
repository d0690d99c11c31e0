pub mod math {
    use glam::Vec2;

    /// `x - floor(x)`, which stays in `[0, 1)` for negative inputs too.
    #[inline(always)]
    pub fn fract(x: f32) -> f32 {
        x - x.floor()
    }

    /// Hash based pseudo-random value in `[0, 1)`. Deterministic for a given
    /// seed; the constants must not change or rendered pixels shift.
    #[inline]
    pub fn rand(seed: Vec2) -> f32 {
        fract(seed.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.5453)
    }
}

pub mod color {
    use glam::Vec3;

    /// Largest channel value kept before scaling to 8 bits, so that
    /// `channel * 255` never reaches 256.
    pub const CHANNEL_MAX: f32 = 0.999;

    /// Averages an accumulated sum and clamps each channel to `[0, CHANNEL_MAX]`.
    pub fn resolve(sum: Vec3, samples: u32) -> Vec3 {
        let scale = 1.0 / samples as f32;
        (sum * scale).clamp(Vec3::ZERO, Vec3::splat(CHANNEL_MAX))
    }

    /// Packs `[0, 1)` channels into `0x00RRGGBB`, truncating each to 8 bits.
    pub fn pack(color: Vec3) -> u32 {
        let r = (color.x * 255.0) as u32;
        let g = (color.y * 255.0) as u32;
        let b = (color.z * 255.0) as u32;
        (r << 16) | (g << 8) | b
    }

    pub fn unpack(word: u32) -> [u8; 3] {
        [(word >> 16) as u8, (word >> 8) as u8, word as u8]
    }
}
