//! Grain, vignette and pixelation

use super::map_colors;
use crate::color::Color;
use crate::texture::{with_locked, TextureHandle};
use crate::util::{smoothstep, Rng};

/// Add uniform noise in `[-amount, amount] * 255` to every channel.
/// `monochrome` applies one offset to all three channels of a pixel.
/// The same seed always yields the same grain.
pub fn add_noise(target: &TextureHandle, amount: f32, monochrome: bool, seed: u64) -> bool {
    if amount <= 0.0 {
        return false;
    }
    let mut rng = Rng::new(seed);
    let spread = amount * 255.0;
    map_colors(target, |c| {
        let mut offset = || rng.range_f32(-spread, spread);
        let (dr, dg, db) = if monochrome {
            let n = offset();
            (n, n, n)
        } else {
            (offset(), offset(), offset())
        };
        let shift = |ch: u8, d: f32| (ch as f32 + d).clamp(0.0, 255.0) as u8;
        Color::argb(c.a, shift(c.r, dr), shift(c.g, dg), shift(c.b, db))
    })
}

/// Darken toward the corners. `strength` in [0, 1] is how dark the corners
/// get; `radius` in [0, 1] is where the falloff starts, as a fraction of
/// the center-to-corner distance.
pub fn vignette(target: &TextureHandle, strength: f32, radius: f32) -> bool {
    let strength = strength.clamp(0.0, 1.0);
    let radius = radius.clamp(0.0, 1.0);
    with_locked(target, |pixels| {
        let w = pixels.width() as f32;
        let h = pixels.height() as f32;
        pixels.map_pixels(|x, y, argb| {
            let u = (x as f32 + 0.5) / w - 0.5;
            let v = (y as f32 + 0.5) / h - 0.5;
            let d = u.hypot(v) / std::f32::consts::FRAC_1_SQRT_2;
            let factor = 1.0 - strength * smoothstep(radius, 1.0, d);
            let c = Color::from_argb(argb);
            let (r, g, b) = c.rgb_f32();
            Color::from_rgb_f32(c.a, r * factor, g * factor, b * factor).to_argb()
        });
    })
}

/// Replace each `size`×`size` block with the pixel near its center.
/// A size of 0 or 1 is a no-op.
pub fn pixelate(target: &TextureHandle, size: u32) -> bool {
    if size <= 1 {
        return false;
    }
    with_locked(target, |pixels| {
        let src = pixels.snapshot();
        let w = pixels.width();
        let h = pixels.height();
        pixels.map_pixels(|x, y, _| {
            let bx = (x / size * size + size / 2).min(w - 1);
            let by = (y / size * size + size / 2).min(h - 1);
            src[(by * w + bx) as usize]
        });
    })
}
