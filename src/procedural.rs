//! Procedural texture generators
//!
//! One-shot fills: every generator visits each pixel of the target once and
//! writes a color derived from a pattern or noise field. `fill_*` writes into
//! an existing texture and reports whether it ran (a texture that cannot be
//! locked, or a degenerate parameter such as a zero tile size, leaves the
//! pixels untouched). `create_*` allocates a new texture of the requested
//! size and fills it, returning `None` for zero dimensions.

use crate::color::Color;
use crate::noise::{
    fractal_noise_2d, noise_to_color, noise_to_grayscale, perlin_2d, threshold_noise,
    turbulence_2d, voronoi_2d, warped_noise_2d,
};
use crate::texture::{shade_uv, with_locked, TextureHandle};

pub const SKY_COLOR: Color = Color::rgb(135, 206, 250);
pub const CLOUD_COLOR: Color = Color::rgb(255, 255, 255);

fn create(width: u32, height: u32, fill: impl FnOnce(&TextureHandle) -> bool) -> Option<TextureHandle> {
    let texture = TextureHandle::new(width, height).ok()?;
    fill(&texture).then_some(texture)
}

/// Write `pattern(x, y)` into every pixel, pixel-space coordinates
fn fill_pixels(target: &TextureHandle, mut pattern: impl FnMut(u32, u32) -> Color) -> bool {
    with_locked(target, |pixels| {
        pixels.map_pixels(|x, y, _| pattern(x, y).to_argb());
    })
}

/// Write `field(u, v)` into every pixel, `(u, v) = (x / width, y / height)`
fn fill_uv(target: &TextureHandle, mut field: impl FnMut(f32, f32) -> Color) -> bool {
    shade_uv(target, |u, v| field(u, v).to_argb())
}

// ============================================================================
// Basic patterns
// ============================================================================

/// Alternating square tiles of `checker_size` pixels, `c1` at the origin
pub fn fill_checkerboard(target: &TextureHandle, checker_size: u32, c1: Color, c2: Color) -> bool {
    if checker_size == 0 {
        return false;
    }
    fill_pixels(target, |x, y| {
        if (x / checker_size + y / checker_size) % 2 == 0 {
            c1
        } else {
            c2
        }
    })
}

pub fn create_checkerboard(
    width: u32,
    height: u32,
    checker_size: u32,
    c1: Color,
    c2: Color,
) -> Option<TextureHandle> {
    create(width, height, |t| fill_checkerboard(t, checker_size, c1, c2))
}

/// Bands of `stripe_width` pixels. Horizontal bands unless `vertical`.
pub fn fill_stripes(
    target: &TextureHandle,
    stripe_width: u32,
    c1: Color,
    c2: Color,
    vertical: bool,
) -> bool {
    if stripe_width == 0 {
        return false;
    }
    fill_pixels(target, |x, y| {
        let coord = if vertical { x } else { y };
        if (coord / stripe_width) % 2 == 0 {
            c1
        } else {
            c2
        }
    })
}

pub fn create_stripes(
    width: u32,
    height: u32,
    stripe_width: u32,
    c1: Color,
    c2: Color,
    vertical: bool,
) -> Option<TextureHandle> {
    create(width, height, |t| fill_stripes(t, stripe_width, c1, c2, vertical))
}

/// Left-to-right ramp, or a radial ramp from the center to the corners
pub fn fill_gradient(target: &TextureHandle, start: Color, end: Color, radial: bool) -> bool {
    let w = target.width() as f32;
    let h = target.height() as f32;
    let cx = w * 0.5;
    let cy = h * 0.5;
    let max_radius = cx.hypot(cy);
    let span = (w - 1.0).max(1.0);

    fill_pixels(target, |x, y| {
        let t = if radial {
            ((x as f32 - cx).hypot(y as f32 - cy) / max_radius).min(1.0)
        } else {
            x as f32 / span
        };
        noise_to_color(t, start, end)
    })
}

pub fn create_gradient(
    width: u32,
    height: u32,
    start: Color,
    end: Color,
    radial: bool,
) -> Option<TextureHandle> {
    create(width, height, |t| fill_gradient(t, start, end, radial))
}

/// Concentric rings `ring_width` pixels wide around the center
pub fn fill_circles(target: &TextureHandle, ring_width: u32, c1: Color, c2: Color) -> bool {
    if ring_width == 0 {
        return false;
    }
    let cx = target.width() as f32 * 0.5;
    let cy = target.height() as f32 * 0.5;
    let ring = ring_width as f32;
    fill_pixels(target, |x, y| {
        let dist = (x as f32 + 0.5 - cx).hypot(y as f32 + 0.5 - cy);
        if (dist / ring) as u32 % 2 == 0 {
            c1
        } else {
            c2
        }
    })
}

pub fn create_circles(
    width: u32,
    height: u32,
    ring_width: u32,
    c1: Color,
    c2: Color,
) -> Option<TextureHandle> {
    create(width, height, |t| fill_circles(t, ring_width, c1, c2))
}

/// Dots of `dot_radius` centered in a grid of `spacing`-pixel cells
pub fn fill_polka_dots(
    target: &TextureHandle,
    dot_radius: u32,
    spacing: u32,
    dot: Color,
    background: Color,
) -> bool {
    if spacing == 0 {
        return false;
    }
    let half = spacing as f32 * 0.5;
    let radius = dot_radius as f32;
    fill_pixels(target, |x, y| {
        let dx = (x % spacing) as f32 + 0.5 - half;
        let dy = (y % spacing) as f32 + 0.5 - half;
        if dx.hypot(dy) <= radius {
            dot
        } else {
            background
        }
    })
}

pub fn create_polka_dots(
    width: u32,
    height: u32,
    dot_radius: u32,
    spacing: u32,
    dot: Color,
    background: Color,
) -> Option<TextureHandle> {
    create(width, height, |t| fill_polka_dots(t, dot_radius, spacing, dot, background))
}

// ============================================================================
// Noise textures
// ============================================================================

/// Greyscale [`perlin_2d`] (persistence 0.5)
pub fn fill_perlin(target: &TextureHandle, frequency: f32, octaves: u32) -> bool {
    fill_uv(target, |u, v| noise_to_grayscale(perlin_2d(u, v, frequency, octaves, 0.5)))
}

pub fn create_perlin(width: u32, height: u32, frequency: f32, octaves: u32) -> Option<TextureHandle> {
    create(width, height, |t| fill_perlin(t, frequency, octaves))
}

/// Greyscale [`turbulence_2d`]
pub fn fill_turbulence(target: &TextureHandle, frequency: f32, octaves: u32) -> bool {
    fill_uv(target, |u, v| noise_to_grayscale(turbulence_2d(u, v, frequency, octaves)))
}

pub fn create_turbulence(
    width: u32,
    height: u32,
    frequency: f32,
    octaves: u32,
) -> Option<TextureHandle> {
    create(width, height, |t| fill_turbulence(t, frequency, octaves))
}

/// Soft-thresholded fractal noise blended from sky blue to white
pub fn fill_clouds(target: &TextureHandle, frequency: f32, octaves: u32) -> bool {
    fill_uv(target, |u, v| {
        let n = fractal_noise_2d(u, v, frequency, octaves, 0.6, 2.0);
        noise_to_color(threshold_noise(n, 0.4, 0.2), SKY_COLOR, CLOUD_COLOR)
    })
}

pub fn create_clouds(width: u32, height: u32, frequency: f32, octaves: u32) -> Option<TextureHandle> {
    create(width, height, |t| fill_clouds(t, frequency, octaves))
}

/// Cellular distance field, `c1` at feature points fading to `c2`
pub fn fill_voronoi(target: &TextureHandle, frequency: f32, c1: Color, c2: Color) -> bool {
    fill_uv(target, |u, v| noise_to_color(voronoi_2d(u, v, frequency), c1, c2))
}

pub fn create_voronoi(
    width: u32,
    height: u32,
    frequency: f32,
    c1: Color,
    c2: Color,
) -> Option<TextureHandle> {
    create(width, height, |t| fill_voronoi(t, frequency, c1, c2))
}

// ============================================================================
// Materials
// ============================================================================

/// Elliptical growth rings perturbed by low-amplitude noise
pub fn fill_wood_grain(target: &TextureHandle, light: Color, dark: Color) -> bool {
    fill_uv(target, |u, v| {
        let dist = (u * u + v * v * 4.0).sqrt();
        let rings = (dist * 20.0).sin() * 0.5 + 0.5 + perlin_2d(u, v, 8.0, 3, 0.3) * 0.3;
        noise_to_color(rings.clamp(0.0, 1.0), dark, light)
    })
}

pub fn create_wood_grain(width: u32, height: u32, light: Color, dark: Color) -> Option<TextureHandle> {
    create(width, height, |t| fill_wood_grain(t, light, dark))
}

/// Domain-warped veins over a faint base noise
pub fn fill_marble(target: &TextureHandle, base: Color, vein: Color) -> bool {
    fill_uv(target, |u, v| {
        let veins = threshold_noise(warped_noise_2d(u, v, 0.1, 4.0), 0.6, 0.1)
            + perlin_2d(u, v, 2.0, 2, 0.3) * 0.2;
        noise_to_color(veins.clamp(0.0, 1.0), base, vein)
    })
}

pub fn create_marble(width: u32, height: u32, base: Color, vein: Color) -> Option<TextureHandle> {
    create(width, height, |t| fill_marble(t, base, vein))
}

/// Brushed surface: the base color scaled by 0.8..1.2 from fine noise plus
/// horizontal scratches. `roughness` in [0, 1] controls the noise share.
pub fn fill_metal(target: &TextureHandle, metal: Color, roughness: f32) -> bool {
    let scale = |c: u8, f: f32| (c as f32 * f).min(255.0) as u8;
    fill_uv(target, |u, v| {
        let n = perlin_2d(u, v, 32.0, 4, 0.3) * roughness + (1.0 - roughness) * 0.5;
        let scratches = perlin_2d(u, v * 10.0, 1.0, 1, 0.5) * 0.1;
        let factor = 0.8 + (n + scratches).clamp(0.0, 1.0) * 0.4;
        Color::rgb(scale(metal.r, factor), scale(metal.g, factor), scale(metal.b, factor))
    })
}

pub fn create_metal(width: u32, height: u32, metal: Color, roughness: f32) -> Option<TextureHandle> {
    create(width, height, |t| fill_metal(t, metal, roughness))
}

/// Running-bond brick courses with mortar joints. Odd courses shift by half
/// a brick; each brick face gets a little noise shading.
pub fn fill_brick(
    target: &TextureHandle,
    brick: Color,
    mortar: Color,
    brick_width: u32,
    brick_height: u32,
) -> bool {
    if brick_width == 0 || brick_height == 0 {
        return false;
    }
    let joint = (brick_height / 8).max(1);
    let w = target.width() as f32;
    let h = target.height() as f32;
    fill_pixels(target, |x, y| {
        let course = y / brick_height;
        let shift = if course % 2 == 1 { brick_width / 2 } else { 0 };
        let bx = (x + shift) % brick_width;
        let by = y % brick_height;
        if bx < joint || by < joint {
            return mortar;
        }
        let shade = 0.85 + perlin_2d(x as f32 / w, y as f32 / h, 24.0, 3, 0.5) * 0.3;
        let scale = |c: u8| (c as f32 * shade).min(255.0) as u8;
        Color::argb(brick.a, scale(brick.r), scale(brick.g), scale(brick.b))
    })
}

pub fn create_brick(
    width: u32,
    height: u32,
    brick: Color,
    mortar: Color,
    brick_width: u32,
    brick_height: u32,
) -> Option<TextureHandle> {
    create(width, height, |t| fill_brick(t, brick, mortar, brick_width, brick_height))
}

/// Fill every pixel with one color
pub fn fill_solid(target: &TextureHandle, color: Color) -> bool {
    with_locked(target, |pixels| pixels.fill(color.to_argb()))
}
