//! Convolution filters
//!
//! Every filter reads neighbours from a snapshot taken before the pass, so
//! no pixel ever sees a value already rewritten in the same pass. Edges
//! clamp: a tap that falls outside the texture reads the nearest edge
//! pixel.

use crate::color::Color;
use crate::texture::{with_locked, PixelBuffer, TextureHandle};

/// Largest side length any constructor accepts
pub const MAX_KERNEL_SIZE: usize = 1025;

/// `size * size`, or `None` when the side is out of range
fn area(size: usize) -> Option<usize> {
    if size > MAX_KERNEL_SIZE {
        return None;
    }
    size.checked_mul(size)
}

/// Square kernel (odd size) plus divisor
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
    divisor: f32,
}

impl Kernel {
    /// `weights` is row-major, `size * size` long. Returns `None` for an
    /// even, zero or oversized side, a length mismatch, or a zero divisor.
    pub fn new(size: usize, weights: Vec<f32>, divisor: f32) -> Option<Self> {
        if size == 0 || size % 2 == 0 || area(size) != Some(weights.len()) || divisor == 0.0 {
            return None;
        }
        Some(Self {
            size,
            weights,
            divisor,
        })
    }

    pub fn identity(size: usize) -> Option<Self> {
        let n = area(size)?;
        let mut weights = vec![0.0; n];
        if let Some(center) = weights.get_mut(n / 2) {
            *center = 1.0;
        }
        Self::new(size, weights, 1.0)
    }

    /// Normalized Gaussian over a `size`×`size` window
    pub fn gaussian(size: usize, sigma: f32) -> Option<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return None;
        }
        let n = area(size)?;
        let half = (size / 2) as f32;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut weights = Vec::with_capacity(n);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - half;
                let dy = y as f32 - half;
                weights.push((-(dx * dx + dy * dy) / two_sigma_sq).exp());
            }
        }
        let sum: f32 = weights.iter().sum();
        weights.iter_mut().for_each(|w| *w /= sum);
        Self::new(size, weights, 1.0)
    }

    /// Uniform average
    pub fn box_blur(size: usize) -> Option<Self> {
        let n = area(size)?;
        Self::new(size, vec![1.0; n], n as f32)
    }

    /// Cross-shaped unsharp kernel, centre `1 + 4·amount`
    pub fn sharpen(amount: f32) -> Self {
        let a = amount;
        Self {
            size: 3,
            weights: vec![0.0, -a, 0.0, -a, 1.0 + 4.0 * a, -a, 0.0, -a, 0.0],
            divisor: 1.0,
        }
    }

    /// Directional relief; `angle` in degrees
    pub fn emboss(strength: f32, angle: f32) -> Self {
        let rad = angle.to_radians();
        let c = rad.cos() * strength;
        let s = rad.sin() * strength;
        Self {
            size: 3,
            weights: vec![-c - s, -s, c - s, -c, 1.0, c, s - c, s, c + s],
            divisor: 1.0,
        }
    }

    /// 8-neighbour Laplacian
    pub fn laplacian() -> Self {
        Self {
            size: 3,
            weights: vec![-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
            divisor: 1.0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn divisor(&self) -> f32 {
        self.divisor
    }
}

/// Tightly packed snapshot with clamp-to-edge lookup
struct Source {
    pixels: Vec<u32>,
    width: i32,
    height: i32,
}

impl Source {
    fn of(buffer: &PixelBuffer) -> Self {
        Self {
            pixels: buffer.snapshot(),
            width: buffer.width() as i32,
            height: buffer.height() as i32,
        }
    }

    #[inline]
    fn at(&self, x: i32, y: i32) -> Color {
        let x = x.clamp(0, self.width - 1);
        let y = y.clamp(0, self.height - 1);
        Color::from_argb(self.pixels[(y * self.width + x) as usize])
    }
}

/// Convolve RGB with `kernel`; each pixel keeps its own alpha
pub fn convolve(buffer: &mut PixelBuffer, kernel: &Kernel) {
    let src = Source::of(buffer);
    let half = (kernel.size / 2) as i32;
    let size = kernel.size as i32;

    buffer.map_pixels(|x, y, _| {
        let (x, y) = (x as i32, y as i32);
        let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
        for ky in 0..size {
            for kx in 0..size {
                let w = kernel.weights[(ky * size + kx) as usize];
                let c = src.at(x + kx - half, y + ky - half);
                r += c.r as f32 * w;
                g += c.g as f32 * w;
                b += c.b as f32 * w;
            }
        }
        let channel = |v: f32| (v / kernel.divisor).clamp(0.0, 255.0) as u8;
        Color::argb(src.at(x, y).a, channel(r), channel(g), channel(b)).to_argb()
    });
}

/// Apply a raw `size`×`size` kernel. Degenerate kernels (even or zero size,
/// wrong length, zero divisor) leave the texture untouched.
pub fn apply_kernel(target: &TextureHandle, weights: &[f32], size: usize, divisor: f32) -> bool {
    match Kernel::new(size, weights.to_vec(), divisor) {
        Some(kernel) => apply(target, &kernel),
        None => false,
    }
}

/// Apply a prepared [`Kernel`]
pub fn apply(target: &TextureHandle, kernel: &Kernel) -> bool {
    with_locked(target, |pixels| convolve(pixels, kernel))
}

/// Widest useful window for `target`. Every tap of a larger window lands
/// on a clamped edge pixel already reachable from this one.
fn window_limit(target: &TextureHandle) -> usize {
    let longest = target.width().max(target.height()) as usize;
    longest.saturating_mul(2).saturating_add(1).min(MAX_KERNEL_SIZE)
}

/// Gaussian blur whose window grows with `radius`: size `2·radius + 1`
/// (forced odd, capped by the texture), sigma = radius
pub fn apply_blur(target: &TextureHandle, radius: f32) -> bool {
    if !radius.is_finite() || radius <= 0.0 {
        return false;
    }
    let mut size = ((radius * 2.0) as usize).saturating_add(1);
    if size % 2 == 0 {
        size += 1;
    }
    let size = size.min(window_limit(target));
    Kernel::gaussian(size, radius).is_some_and(|k| apply(target, &k))
}

/// Gaussian blur with a window of ±3 sigma, capped by the texture
pub fn apply_gaussian_blur(target: &TextureHandle, sigma: f32) -> bool {
    if !sigma.is_finite() || sigma <= 0.0 {
        return false;
    }
    let reach = (sigma * 3.0).ceil() as usize;
    let size = reach.saturating_mul(2).saturating_add(1).min(window_limit(target));
    Kernel::gaussian(size, sigma).is_some_and(|k| apply(target, &k))
}

/// Box blur; an even `size` is rejected, a larger one than the texture
/// can use is shrunk
pub fn apply_box_blur(target: &TextureHandle, size: usize) -> bool {
    if size % 2 == 0 {
        return false;
    }
    Kernel::box_blur(size.min(window_limit(target))).is_some_and(|k| apply(target, &k))
}

pub fn apply_sharpen(target: &TextureHandle, amount: f32) -> bool {
    apply(target, &Kernel::sharpen(amount))
}

pub fn apply_emboss(target: &TextureHandle, strength: f32, angle: f32) -> bool {
    apply(target, &Kernel::emboss(strength, angle))
}

pub fn apply_laplacian(target: &TextureHandle) -> bool {
    apply(target, &Kernel::laplacian())
}

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Sobel responses (gx, gy) of `sample` around (x, y)
fn sobel_at(src: &Source, x: i32, y: i32, sample: impl Fn(Color) -> f32) -> (f32, f32) {
    let (mut gx, mut gy) = (0.0, 0.0);
    for ky in 0..3 {
        for kx in 0..3 {
            let v = sample(src.at(x + kx - 1, y + ky - 1));
            let i = (ky * 3 + kx) as usize;
            gx += SOBEL_X[i] * v;
            gy += SOBEL_Y[i] * v;
        }
    }
    (gx, gy)
}

/// Per-channel Sobel gradient magnitude
pub fn apply_sobel(target: &TextureHandle) -> bool {
    with_locked(target, |pixels| {
        let src = Source::of(pixels);
        pixels.map_pixels(|x, y, _| {
            let (x, y) = (x as i32, y as i32);
            let magnitude = |channel: fn(Color) -> u8| {
                let (gx, gy) = sobel_at(&src, x, y, |c| channel(c) as f32);
                gx.hypot(gy).min(255.0) as u8
            };
            Color::argb(
                src.at(x, y).a,
                magnitude(|c| c.r),
                magnitude(|c| c.g),
                magnitude(|c| c.b),
            )
            .to_argb()
        });
    })
}

/// Greyscale edge map from the luminance gradient. Magnitudes are scaled
/// to [0, 1]; anything below `threshold` becomes black.
pub fn apply_edge_detection(target: &TextureHandle, threshold: f32) -> bool {
    with_locked(target, |pixels| {
        let src = Source::of(pixels);
        pixels.map_pixels(|x, y, _| {
            let (gx, gy) = sobel_at(&src, x as i32, y as i32, Color::luminance);
            // A full black/white step yields |g| = 4 along one axis
            let m = (gx.hypot(gy) / 4.0).min(1.0);
            let level = if m >= threshold { (m * 255.0) as u8 } else { 0 };
            Color::argb(src.at(x as i32, y as i32).a, level, level, level).to_argb()
        });
    })
}
