//! Noise Generation Utilities
//!
//! Cheap sinusoidal approximations of the classic noise families: octave
//! sums of `sin(x·f)·cos(y·f)`, ridged and billowed variants, domain
//! warping and a cellular (Voronoi) field. None of these reproduce canonical
//! gradient noise; they are pure, stateless and deterministic, which is all
//! the animated effects need.
//!
//! Unless stated otherwise a function returns a value in [0, 1].

use std::f32::consts::TAU;

use crate::color::{lerp_color, Color};

pub const DEFAULT_OCTAVES: u32 = 4;
pub const DEFAULT_PERSISTENCE: f32 = 0.5;
pub const DEFAULT_LACUNARITY: f32 = 2.0;

/// Octave sum of `basis(x·f, y·f)` with per-octave amplitude and frequency
/// factors. Returns (sum, total amplitude).
#[inline]
fn octave_sum(
    x: f32,
    y: f32,
    frequency: f32,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
    basis: impl Fn(f32, f32) -> f32,
) -> (f32, f32) {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut freq = frequency;
    let mut total = 0.0;
    for _ in 0..octaves {
        value += basis(x * freq, y * freq) * amplitude;
        total += amplitude;
        amplitude *= persistence;
        freq *= lacunarity;
    }
    (value, total)
}

/// Fold a signed, amplitude-normalized sum into [0, 1]
#[inline]
fn normalize_signed(value: f32, total: f32) -> f32 {
    if total == 0.0 {
        return 0.5;
    }
    ((value / total) * 0.5 + 0.5).clamp(0.0, 1.0)
}

#[inline]
fn wave(x: f32, y: f32) -> f32 {
    x.sin() * y.cos()
}

#[inline]
fn wave_tau(x: f32, y: f32) -> f32 {
    (x * TAU).sin() * (y * TAU).cos()
}

/// Octave sum of `sin(x·f)·cos(y·f)`; amplitude scales by `persistence` and
/// frequency doubles each octave. Normalized by the total amplitude.
pub fn perlin_2d(x: f32, y: f32, frequency: f32, octaves: u32, persistence: f32) -> f32 {
    let (value, total) = octave_sum(x, y, frequency, octaves, persistence, 2.0, wave);
    normalize_signed(value, total)
}

/// Single sinusoidal layer at a 2π-scaled frequency
pub fn simplex_2d(x: f32, y: f32, frequency: f32) -> f32 {
    wave_tau(x * frequency, y * frequency) * 0.5 + 0.5
}

/// Sharp ridges at the zero crossings of [`perlin_2d`]
pub fn ridge_2d(x: f32, y: f32, frequency: f32, octaves: u32) -> f32 {
    let n = perlin_2d(x, y, frequency, octaves, DEFAULT_PERSISTENCE);
    1.0 - (n * 2.0 - 1.0).abs()
}

/// Octave sum of `|sin·cos|` with halving amplitude, clamped to 1.
///
/// The sum is not divided by the total amplitude, so a few octaves already
/// push bright regions into saturation. See [`turbulence_2d_normalized`].
pub fn turbulence_2d(x: f32, y: f32, frequency: f32, octaves: u32) -> f32 {
    let (value, _) = octave_sum(x, y, frequency, octaves, 0.5, 2.0, |x, y| wave(x, y).abs());
    value.min(1.0)
}

/// [`turbulence_2d`] divided by the total amplitude
pub fn turbulence_2d_normalized(x: f32, y: f32, frequency: f32, octaves: u32) -> f32 {
    let (value, total) =
        octave_sum(x, y, frequency, octaves, 0.5, 2.0, |x, y| wave(x, y).abs());
    if total == 0.0 {
        0.0
    } else {
        (value / total).min(1.0)
    }
}

/// fBm over the 2π basis with explicit lacunarity
pub fn fractal_noise_2d(
    x: f32,
    y: f32,
    frequency: f32,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
) -> f32 {
    let (value, total) = octave_sum(x, y, frequency, octaves, persistence, lacunarity, wave_tau);
    normalize_signed(value, total)
}

/// Octave sum of `(1 - |n|)²`, clamped to 1
pub fn ridged_multifractal_2d(
    x: f32,
    y: f32,
    frequency: f32,
    octaves: u32,
    persistence: f32,
) -> f32 {
    let (value, _) = octave_sum(x, y, frequency, octaves, persistence, 2.0, |x, y| {
        let ridge = 1.0 - wave_tau(x, y).abs();
        ridge * ridge
    });
    value.clamp(0.0, 1.0)
}

/// Octave sum of `|n|`, clamped to 1
pub fn billow_noise_2d(x: f32, y: f32, frequency: f32, octaves: u32, persistence: f32) -> f32 {
    let (value, _) = octave_sum(x, y, frequency, octaves, persistence, 2.0, |x, y| {
        wave_tau(x, y).abs()
    });
    value.clamp(0.0, 1.0)
}

/// Perlin sampled at a position displaced by two low-frequency Perlin fields
pub fn warped_noise_2d(x: f32, y: f32, warp_strength: f32, frequency: f32) -> f32 {
    let warp_x = perlin_2d(x, y, frequency * 0.5, 3, DEFAULT_PERSISTENCE) * warp_strength;
    let warp_y = perlin_2d(x + 100.0, y, frequency * 0.5, 3, DEFAULT_PERSISTENCE) * warp_strength;
    perlin_2d(x + warp_x, y + warp_y, frequency, 4, DEFAULT_PERSISTENCE)
}

/// Feature point of cell (cx, cy). A trigonometric hash of the cell
/// coordinates, so no table or RNG state is involved.
#[inline]
fn cell_point(cx: i32, cy: i32) -> (f32, f32) {
    let fx = cx as f32;
    let fy = cy as f32;
    (
        fx + (fx * 23.1 + fy * 19.7).sin() * 0.5 + 0.5,
        fy + (fx * 31.3 + fy * 17.5).cos() * 0.5 + 0.5,
    )
}

/// Distance to the nearest feature point over the 3×3 neighbouring cells,
/// clamped to 1
pub fn voronoi_2d(x: f32, y: f32, frequency: f32) -> f32 {
    let x = x * frequency;
    let y = y * frequency;
    let cell_x = x.floor() as i32;
    let cell_y = y.floor() as i32;

    let mut min_dist = f32::MAX;
    for oy in -1..=1 {
        for ox in -1..=1 {
            let (px, py) = cell_point(cell_x + ox, cell_y + oy);
            min_dist = min_dist.min((x - px).hypot(y - py));
        }
    }
    min_dist.min(1.0)
}

/// Linear per-channel blend between two colors, alpha included
#[inline]
pub fn noise_to_color(noise: f32, low: Color, high: Color) -> Color {
    lerp_color(low, high, noise)
}

/// Opaque grey of intensity `noise`
#[inline]
pub fn noise_to_grayscale(noise: f32) -> Color {
    let i = (noise.clamp(0.0, 1.0) * 255.0) as u8;
    Color::rgb(i, i, i)
}

/// Linear map of [0, 1] onto [new_min, new_max]
#[inline]
pub fn remap_noise(noise: f32, new_min: f32, new_max: f32) -> f32 {
    new_min + (new_max - new_min) * noise
}

/// `a·(1-blend) + b·blend`, blend clamped to [0, 1]
#[inline]
pub fn combine_noise(a: f32, b: f32, blend: f32) -> f32 {
    let blend = blend.clamp(0.0, 1.0);
    a * (1.0 - blend) + b * blend
}

/// Hard step at `threshold` (inclusive) when `softness <= 0`, otherwise a
/// smoothstep over `[threshold - softness/2, threshold + softness/2]`.
#[inline]
pub fn threshold_noise(noise: f32, threshold: f32, softness: f32) -> f32 {
    if softness <= 0.0 {
        return if noise >= threshold { 1.0 } else { 0.0 };
    }
    let lo = threshold - softness * 0.5;
    let hi = threshold + softness * 0.5;
    if noise < lo {
        0.0
    } else if noise > hi {
        1.0
    } else {
        let t = (noise - lo) / softness;
        t * t * (3.0 - 2.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> impl Iterator<Item = (f32, f32, f32, u32)> {
        (0..12).flat_map(|i| {
            (0..12).flat_map(move |j| {
                (1..=8u32).map(move |oct| {
                    let x = i as f32 * 0.731 - 2.0;
                    let y = j as f32 * 1.137 - 3.0;
                    let freq = (i * 12 + j) as f32 * 100.0 / 143.0;
                    (x, y, freq, oct)
                })
            })
        })
    }

    #[test]
    fn test_perlin_deterministic() {
        let a = perlin_2d(1.25, -3.5, 4.0, 5, 0.5);
        let b = perlin_2d(1.25, -3.5, 4.0, 5, 0.5);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_core_noise_range() {
        for (x, y, freq, oct) in sample_grid() {
            for v in [
                perlin_2d(x, y, freq, oct, 0.5),
                turbulence_2d(x, y, freq, oct),
                ridge_2d(x, y, freq, oct),
                voronoi_2d(x, y, freq),
            ] {
                assert!((0.0..=1.0).contains(&v), "x={x} y={y} f={freq} o={oct} v={v}");
            }
        }
    }

    #[test]
    fn test_variant_range() {
        for (x, y, freq, oct) in sample_grid().step_by(7) {
            for v in [
                simplex_2d(x, y, freq),
                turbulence_2d_normalized(x, y, freq, oct),
                fractal_noise_2d(x, y, freq, oct, 0.5, 2.0),
                ridged_multifractal_2d(x, y, freq, oct, 0.5),
                billow_noise_2d(x, y, freq, oct, 0.5),
                warped_noise_2d(x, y, 0.3, freq),
            ] {
                assert!((0.0..=1.0).contains(&v), "x={x} y={y} f={freq} o={oct} v={v}");
            }
        }
    }

    #[test]
    fn test_zero_octaves_is_neutral() {
        assert_eq!(perlin_2d(3.0, 4.0, 1.0, 0, 0.5), 0.5);
        assert_eq!(turbulence_2d(3.0, 4.0, 1.0, 0), 0.0);
        assert_eq!(turbulence_2d_normalized(3.0, 4.0, 1.0, 0), 0.0);
    }

    #[test]
    fn test_single_octave_matches_basis() {
        let (x, y) = (0.4_f32, 1.3_f32);
        let expected = (x * 2.0).sin() * (y * 2.0).cos() * 0.5 + 0.5;
        assert!((perlin_2d(x, y, 2.0, 1, 0.5) - expected).abs() < 1e-6);
        let turb = ((x * 2.0).sin() * (y * 2.0).cos()).abs();
        assert!((turbulence_2d(x, y, 2.0, 1) - turb).abs() < 1e-6);
    }

    #[test]
    fn test_turbulence_normalization_differs() {
        // Raw sum exceeds the normalized one whenever more than one octave contributes
        let raw = turbulence_2d(0.3, 0.2, 1.0, 4);
        let norm = turbulence_2d_normalized(0.3, 0.2, 1.0, 4);
        assert!(raw >= norm);
    }

    #[test]
    fn test_voronoi_zero_at_feature_point() {
        let (px, py) = cell_point(2, 3);
        assert!(voronoi_2d(px, py, 1.0) < 1e-5);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(threshold_noise(0.4, 0.4, 0.0), 1.0);
        for i in 0..40 {
            let v = i as f32 * 0.01;
            assert_eq!(threshold_noise(v, 0.4, 0.0), 0.0);
        }
        assert_eq!(threshold_noise(0.2, 0.5, 0.2), 0.0);
        assert_eq!(threshold_noise(0.7, 0.5, 0.2), 1.0);
        assert!((threshold_noise(0.5, 0.5, 0.2) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_color_mapping() {
        let c = noise_to_color(0.5, Color::argb(0, 0, 0, 0), Color::argb(200, 200, 100, 50));
        assert_eq!(c, Color::argb(100, 100, 50, 25));
        assert_eq!(noise_to_color(7.0, Color::BLACK, Color::RED), Color::RED);
        assert_eq!(noise_to_grayscale(1.0), Color::WHITE);
        assert_eq!(noise_to_grayscale(-1.0), Color::BLACK);
    }

    #[test]
    fn test_remap_and_combine() {
        assert_eq!(remap_noise(0.5, -1.0, 1.0), 0.0);
        assert_eq!(combine_noise(0.2, 0.8, 0.5), 0.5);
        assert_eq!(combine_noise(0.2, 0.8, 3.0), 0.8);
    }
}
