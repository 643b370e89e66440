//! Per-pixel color adjustments. Alpha is never changed.

use super::map_colors;
use crate::color::{adjust_gamma, hsv_to_rgb, Color};
use crate::texture::TextureHandle;

/// `brightness` in [-1, 1] (clamped). Positive values move each channel
/// toward 255, negative values scale it toward 0.
pub fn adjust_brightness(target: &TextureHandle, brightness: f32) -> bool {
    let b = brightness.clamp(-1.0, 1.0);
    let channel = move |c: u8| {
        let c = c as f32;
        let out = if b > 0.0 { c + (255.0 - c) * b } else { c * (1.0 + b) };
        out.clamp(0.0, 255.0) as u8
    };
    map_colors(target, |c| Color::argb(c.a, channel(c.r), channel(c.g), channel(c.b)))
}

/// Contrast factor for `contrast` in roughly [-255, 255]
#[inline]
fn contrast_factor(contrast: f32) -> f32 {
    (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
}

/// Stretch (positive) or flatten (negative) channels around mid-grey
pub fn adjust_contrast(target: &TextureHandle, contrast: f32) -> bool {
    let factor = contrast_factor(contrast.clamp(-255.0, 255.0));
    let channel = move |c: u8| (factor * (c as f32 - 128.0) + 128.0).clamp(0.0, 255.0) as u8;
    map_colors(target, |c| Color::argb(c.a, channel(c.r), channel(c.g), channel(c.b)))
}

/// Multiply HSV saturation by `saturation` (0 = greyscale, 1 = unchanged)
pub fn adjust_saturation(target: &TextureHandle, saturation: f32) -> bool {
    let k = saturation.max(0.0);
    map_colors(target, |c| {
        let mut hsv = c.to_hsv();
        hsv.s = (hsv.s * k).clamp(0.0, 1.0);
        hsv_to_rgb(hsv).with_alpha(c.a)
    })
}

/// Rotate hue by `degrees`
pub fn adjust_hue(target: &TextureHandle, degrees: f32) -> bool {
    map_colors(target, |c| {
        let mut hsv = c.to_hsv();
        hsv.h = (hsv.h + degrees).rem_euclid(360.0);
        hsv_to_rgb(hsv).with_alpha(c.a)
    })
}

/// Gamma <= 0 is a no-op
pub fn adjust_gamma_correction(target: &TextureHandle, gamma: f32) -> bool {
    if gamma <= 0.0 {
        return false;
    }
    map_colors(target, |c| adjust_gamma(c, gamma))
}

/// Scale each channel independently
pub fn adjust_color_balance(target: &TextureHandle, red: f32, green: f32, blue: f32) -> bool {
    let scale = |c: u8, k: f32| (c as f32 * k.max(0.0)).min(255.0) as u8;
    map_colors(target, |c| Color::argb(c.a, scale(c.r, red), scale(c.g, green), scale(c.b, blue)))
}

/// Quantize each channel to `levels` evenly spaced values. Fewer than two
/// levels is a no-op.
pub fn posterize(target: &TextureHandle, levels: u32) -> bool {
    if levels < 2 {
        return false;
    }
    let steps = (levels - 1) as f32;
    let channel = move |c: u8| ((c as f32 / 255.0 * steps).round() * 255.0 / steps).round() as u8;
    map_colors(target, |c| Color::argb(c.a, channel(c.r), channel(c.g), channel(c.b)))
}

/// Luminance threshold in [0, 1]. `binary` maps to pure black/white;
/// otherwise pixels at or above the threshold keep their color and the
/// rest go black.
pub fn threshold(target: &TextureHandle, threshold: f32, binary: bool) -> bool {
    map_colors(target, |c| {
        let above = c.luminance() >= threshold;
        match (above, binary) {
            (true, true) => Color::WHITE.with_alpha(c.a),
            (true, false) => c,
            (false, _) => Color::BLACK.with_alpha(c.a),
        }
    })
}

pub fn invert(target: &TextureHandle) -> bool {
    map_colors(target, |c| Color::argb(c.a, 255 - c.r, 255 - c.g, 255 - c.b))
}

/// Sepia tone blended over the original by `intensity` in [0, 1]
pub fn sepia(target: &TextureHandle, intensity: f32) -> bool {
    let t = intensity.clamp(0.0, 1.0);
    map_colors(target, |c| {
        let (r, g, b) = c.rgb_f32();
        let sr = 0.393 * r + 0.769 * g + 0.189 * b;
        let sg = 0.349 * r + 0.686 * g + 0.168 * b;
        let sb = 0.272 * r + 0.534 * g + 0.131 * b;
        Color::from_rgb_f32(
            c.a,
            r + (sr - r) * t,
            g + (sg - g) * t,
            b + (sb - b) * t,
        )
    })
}

/// Rec.601 greyscale
pub fn grayscale(target: &TextureHandle) -> bool {
    map_colors(target, |c| {
        let l = c.luminance();
        Color::from_rgb_f32(c.a, l, l, l)
    })
}
