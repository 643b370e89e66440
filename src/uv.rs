//! UV transform matrices for texture-coordinate animation
//!
//! Row-vector convention: a coordinate is the row `[u v 1]` and transforms
//! as `[u v 1] × M`, so translation lives in the third row. Composing "A
//! then B" is `A × B`, which is what [`combine`] returns.
//!
//! Everything here is pure algebra on (time, parameters); nothing touches a
//! texture. [`crate::post::apply_uv_transform`] resamples a texture through
//! one of these matrices when a CPU-side result is wanted.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 2D vector for UV coordinates and centers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Texture center (0.5, 0.5)
    pub const CENTER: Self = Self::new(0.5, 0.5);

    #[inline]
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

/// 3×3 homogeneous matrix, `m[row][col]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    #[inline]
    pub const fn translation(u: f32, v: f32) -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [u, v, 1.0]],
        }
    }

    #[inline]
    pub const fn scaling(su: f32, sv: f32) -> Self {
        Self {
            m: [[su, 0.0, 0.0], [0.0, sv, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Counter-clockwise rotation about the origin, radians
    #[inline]
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: [[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Conjugate `self` so it acts about `center` instead of the origin
    pub fn about(self, center: Vec2) -> Self {
        Self::translation(-center.x, -center.y) * self * Self::translation(center.x, center.y)
    }

    /// Translation part (third row)
    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.m[2][0], self.m[2][1])
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut m = [[0.0; 3]; 3];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        Self { m }
    }
}

// ============================================================================
// Basic transforms
// ============================================================================

pub fn identity() -> Mat3 {
    Mat3::IDENTITY
}

/// Offset every coordinate by (offset_u, offset_v)
pub fn scroll(offset_u: f32, offset_v: f32) -> Mat3 {
    Mat3::translation(offset_u, offset_v)
}

pub fn translation(u: f32, v: f32) -> Mat3 {
    scroll(u, v)
}

pub fn scale(scale_u: f32, scale_v: f32) -> Mat3 {
    Mat3::scaling(scale_u, scale_v)
}

/// Rotation about the UV origin, radians
pub fn rotation(angle: f32) -> Mat3 {
    Mat3::rotation(angle)
}

// ============================================================================
// Animated transforms
// ============================================================================

/// Oscillating offset `sin(time·frequency)·amplitude`, along U when
/// `horizontal`, otherwise along V
pub fn sine_wave(time: f32, frequency: f32, amplitude: f32, horizontal: bool) -> Mat3 {
    let offset = (time * frequency).sin() * amplitude;
    if horizontal {
        Mat3::translation(offset, 0.0)
    } else {
        Mat3::translation(0.0, offset)
    }
}

/// Uniform scale oscillating between `min_scale` and `max_scale`
pub fn pulse(time: f32, frequency: f32, min_scale: f32, max_scale: f32) -> Mat3 {
    let t = (time * frequency).sin() * 0.5 + 0.5;
    let s = min_scale + (max_scale - min_scale) * t;
    Mat3::scaling(s, s)
}

/// Offset tracing a circle of `radius`; the center only positions the
/// circle, so the offset itself is independent of it
pub fn orbital(time: f32, speed: f32, radius: f32, center: Vec2) -> Mat3 {
    let angle = time * speed;
    let u = center.x + angle.cos() * radius - center.x;
    let v = center.y + angle.sin() * radius - center.y;
    Mat3::translation(u, v)
}

/// Rotation about `center` swinging by `sin(time)·intensity` radians
pub fn swirl(time: f32, intensity: f32, center: Vec2) -> Mat3 {
    Mat3::rotation(time.sin() * intensity).about(center)
}

/// Circular offset whose radius pulses with `sin(time·frequency)`
pub fn ripple(time: f32, frequency: f32, amplitude: f32) -> Mat3 {
    let phase = time * frequency;
    let r = phase.sin() * amplitude;
    Mat3::translation(r * phase.sin(), r * phase.cos())
}

/// Jittering offset built from incommensurate sines
pub fn turbulence(time: f32, intensity: f32) -> Mat3 {
    let u = (time * 3.7).sin() * (time * 2.3).cos() * intensity;
    let v = (time * 4.1).cos() * (time * 1.9).sin() * intensity;
    Mat3::translation(u, v)
}

pub fn warp(time: f32, strength: f32, frequency: f32) -> Mat3 {
    let u = (time * frequency).sin() * strength;
    let v = (time * frequency * 1.3).cos() * strength;
    Mat3::translation(u, v)
}

/// Zoom by `1 + strength` about `center`
pub fn fisheye(strength: f32, center: Vec2) -> Mat3 {
    let s = 1.0 + strength;
    Mat3::scaling(s, s).about(center)
}

/// Zoom by `1 + k1 + k2` about `center`
pub fn barrel(k1: f32, k2: f32, center: Vec2) -> Mat3 {
    let s = 1.0 + k1 + k2;
    Mat3::scaling(s, s).about(center)
}

// ============================================================================
// Composition
// ============================================================================

/// `a` then `b`
#[inline]
pub fn combine(a: &Mat3, b: &Mat3) -> Mat3 {
    *a * *b
}

/// `[u v 1] × m`, divided through by the homogeneous coordinate when it is
/// neither 0 nor 1
pub fn transform_uv(uv: Vec2, m: &Mat3) -> Vec2 {
    let x = uv.x * m.m[0][0] + uv.y * m.m[1][0] + m.m[2][0];
    let y = uv.x * m.m[0][1] + uv.y * m.m[1][1] + m.m[2][1];
    let w = uv.x * m.m[0][2] + uv.y * m.m[1][2] + m.m[2][2];
    if w != 0.0 && w != 1.0 {
        Vec2::new(x / w, y / w)
    } else {
        Vec2::new(x, y)
    }
}

// ============================================================================
// Presets
// ============================================================================

pub fn scrolling_clouds(time: f32) -> Mat3 {
    let drift = scroll(time * 0.01, time * 0.005);
    let zoom = scale(1.5, 1.5);
    let wave = sine_wave(time, 0.5, 0.02, true);
    combine(&combine(&drift, &zoom), &wave)
}

pub fn water_surface(time: f32) -> Mat3 {
    let drift = scroll(time * 0.02, time * 0.01);
    let wave1 = sine_wave(time, 2.0, 0.01, true);
    let wave2 = sine_wave(time * 1.3, 1.5, 0.008, false);
    combine(&combine(&drift, &wave1), &wave2)
}

/// Upward scroll with jitter
pub fn fire_flicker(time: f32) -> Mat3 {
    let jitter = turbulence(time, 0.005);
    let rise = scroll(0.0, time * 0.1);
    let flicker = sine_wave(time, 8.0, 0.002, true);
    combine(&combine(&jitter, &rise), &flicker)
}

pub fn electric_distortion(time: f32) -> Mat3 {
    combine(&turbulence(time, 0.02), &pulse(time, 6.0, 0.98, 1.02))
}

/// Named preset, selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvPreset {
    ScrollingClouds,
    WaterSurface,
    FireFlicker,
    ElectricDistortion,
}

impl UvPreset {
    pub fn matrix(self, time: f32) -> Mat3 {
        match self {
            Self::ScrollingClouds => scrolling_clouds(time),
            Self::WaterSurface => water_surface(time),
            Self::FireFlicker => fire_flicker(time),
            Self::ElectricDistortion => electric_distortion(time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn identity_leaves_uv() {
        let uv = Vec2::new(0.3, 0.7);
        assert!(transform_uv(uv, &identity()).approx_eq(&uv, EPS));
    }

    #[test]
    fn translation_is_third_row() {
        let m = scroll(0.25, -0.5);
        assert_eq!(m.m[2], [0.25, -0.5, 1.0]);
        let out = transform_uv(Vec2::new(0.1, 0.2), &m);
        assert!(out.approx_eq(&Vec2::new(0.35, -0.3), EPS));
    }

    #[test]
    fn combine_applies_left_first() {
        // Scale then translate vs translate then scale
        let s = scale(2.0, 2.0);
        let t = translation(1.0, 0.0);
        let uv = Vec2::new(1.0, 1.0);
        assert!(transform_uv(uv, &combine(&s, &t)).approx_eq(&Vec2::new(3.0, 2.0), EPS));
        assert!(transform_uv(uv, &combine(&t, &s)).approx_eq(&Vec2::new(4.0, 2.0), EPS));
    }

    #[test]
    fn rotation_quarter_turn() {
        let out = transform_uv(Vec2::new(1.0, 0.0), &rotation(FRAC_PI_2));
        assert!(out.approx_eq(&Vec2::new(0.0, 1.0), EPS), "{out:?}");
    }

    #[test]
    fn swirl_and_fisheye_fix_their_center() {
        let c = Vec2::new(0.4, 0.6);
        assert!(transform_uv(c, &swirl(1.2, 2.0, c)).approx_eq(&c, EPS));
        assert!(transform_uv(c, &fisheye(0.5, c)).approx_eq(&c, EPS));
        assert!(transform_uv(c, &barrel(0.2, 0.1, c)).approx_eq(&c, EPS));
        // Points off-center move away from it
        let p = transform_uv(Vec2::new(0.5, 0.6), &fisheye(1.0, c));
        assert!(p.approx_eq(&Vec2::new(0.6, 0.6), EPS));
    }

    #[test]
    fn pulse_stays_between_bounds() {
        for i in 0..100 {
            let m = pulse(i as f32 * 0.13, 3.0, 0.9, 1.1);
            assert!((0.9 - EPS..=1.1 + EPS).contains(&m.m[0][0]));
            assert_eq!(m.m[0][0], m.m[1][1]);
        }
    }

    #[test]
    fn orbital_offset_has_constant_radius() {
        for i in 0..20 {
            let m = orbital(i as f32 * 0.4, 1.5, 0.25, Vec2::CENTER);
            assert!((m.offset().length() - 0.25).abs() < 1e-4);
        }
    }

    #[test]
    fn animated_transforms_rest_at_time_zero() {
        assert!(sine_wave(0.0, 3.0, 0.1, true).approx_eq(&identity(), EPS));
        assert!(turbulence(0.0, 1.0).approx_eq(&identity(), EPS));
        assert!(ripple(0.0, 2.0, 1.0).approx_eq(&identity(), EPS));
        assert!(swirl(0.0, 5.0, Vec2::CENTER).approx_eq(&identity(), EPS));
    }

    #[test]
    fn presets_are_affine() {
        for preset in [
            UvPreset::ScrollingClouds,
            UvPreset::WaterSurface,
            UvPreset::FireFlicker,
            UvPreset::ElectricDistortion,
        ] {
            let m = preset.matrix(2.5);
            assert_eq!([m.m[0][2], m.m[1][2], m.m[2][2]], [0.0, 0.0, 1.0], "{preset:?}");
        }
        let flicker = fire_flicker(10.0);
        assert!(flicker.offset().y > 0.9);
    }
}
