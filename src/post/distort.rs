//! Resampling distortions
//!
//! Each pass takes a copy of the texture, then for every destination pixel
//! computes where in the source it should read from and samples the copy
//! bilinearly at that UV.

use std::f32::consts::TAU;

use crate::texture::{with_locked, AddressMode, PixelBuffer, TextureHandle};
use crate::uv::{transform_uv, Mat3, Vec2};

/// Resample every pixel from `lookup(u, v)` in a snapshot of the buffer
fn resample(target: &TextureHandle, mode: AddressMode, lookup: impl Fn(Vec2) -> Vec2) -> bool {
    with_locked(target, |pixels| {
        let src: PixelBuffer = pixels.clone();
        pixels.shade_uv(|u, v| {
            let from = lookup(Vec2::new(u, v));
            src.sample_bilinear(from.x, from.y, mode)
        });
    })
}

/// Concentric waves around `center`: each pixel reads from a point pushed
/// radially by `sin(distance·frequency·2π + phase)·amplitude`
pub fn ripple(target: &TextureHandle, amplitude: f32, frequency: f32, phase: f32, center: Vec2) -> bool {
    resample(target, AddressMode::Clamp, |uv| {
        let d = uv - center;
        let dist = d.length();
        if dist == 0.0 {
            return uv;
        }
        let push = (dist * frequency * TAU + phase).sin() * amplitude;
        uv + d * (push / dist)
    })
}

/// Twist around `center`. Rotation is `angle` radians at the center and
/// falls off quadratically to zero at `radius`.
pub fn swirl(target: &TextureHandle, angle: f32, radius: f32, center: Vec2) -> bool {
    if radius <= 0.0 {
        return false;
    }
    resample(target, AddressMode::Clamp, |uv| {
        let d = uv - center;
        let dist = d.length();
        if dist >= radius {
            return uv;
        }
        let falloff = 1.0 - dist / radius;
        let (sin, cos) = (angle * falloff * falloff).sin_cos();
        center + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
    })
}

/// Each destination pixel at `uv` reads the source at `transform_uv(uv, m)`
pub fn apply_uv_transform(target: &TextureHandle, m: &Mat3, mode: AddressMode) -> bool {
    resample(target, mode, |uv| transform_uv(uv, m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::uv;

    fn gradient(w: u32, h: u32) -> TextureHandle {
        let tex = TextureHandle::new(w, h).unwrap();
        tex.try_lock()
            .unwrap()
            .map_pixels(|x, y, _| Color::rgb((x * 20) as u8, (y * 20) as u8, 0).to_argb());
        tex
    }

    #[test]
    fn identity_transform_keeps_pixels() {
        let tex = gradient(8, 8);
        let before = tex.snapshot().unwrap();
        assert!(apply_uv_transform(&tex, &uv::identity(), AddressMode::Wrap));
        assert_eq!(tex.snapshot().unwrap(), before);
    }

    #[test]
    fn whole_texel_scroll_shifts_wrapped() {
        let tex = gradient(4, 1);
        let before = tex.snapshot().unwrap();
        assert!(apply_uv_transform(&tex, &uv::scroll(0.25, 0.0), AddressMode::Wrap));
        let after = tex.snapshot().unwrap();
        assert_eq!(after, vec![before[1], before[2], before[3], before[0]]);
    }

    #[test]
    fn zero_amplitude_ripple_is_identity() {
        let tex = gradient(8, 8);
        let before = tex.snapshot().unwrap();
        assert!(ripple(&tex, 0.0, 4.0, 0.0, Vec2::CENTER));
        assert_eq!(tex.snapshot().unwrap(), before);
    }

    #[test]
    fn swirl_outside_radius_is_untouched() {
        let tex = gradient(8, 8);
        let before = tex.snapshot().unwrap();
        assert!(swirl(&tex, 3.0, 0.2, Vec2::CENTER));
        let after = tex.snapshot().unwrap();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[63], before[63]);
        assert_ne!(after, before);
        assert!(!swirl(&tex, 1.0, 0.0, Vec2::CENTER));
    }
}
