//! One-shot post-processing filters
//!
//! Every filter locks the target, rewrites it in place and returns whether
//! it ran. A texture that cannot be locked is left untouched. Filters that
//! read neighbours work from a snapshot, so results never depend on pixel
//! visiting order.

mod adjust;
mod distort;
mod kernel;
mod stylize;

pub use adjust::{
    adjust_brightness, adjust_color_balance, adjust_contrast, adjust_gamma_correction, adjust_hue,
    adjust_saturation, grayscale, invert, posterize, sepia, threshold,
};
pub use distort::{apply_uv_transform, ripple, swirl};
pub use kernel::{
    apply, apply_blur, apply_box_blur, apply_edge_detection, apply_emboss, apply_gaussian_blur,
    apply_kernel, apply_laplacian, apply_sharpen, apply_sobel, convolve, Kernel, MAX_KERNEL_SIZE,
};
pub use stylize::{add_noise, pixelate, vignette};

use crate::color::Color;
use crate::texture::{with_locked, TextureHandle};

/// Point-wise rewrite of every pixel through `f`
fn map_colors(target: &TextureHandle, mut f: impl FnMut(Color) -> Color) -> bool {
    with_locked(target, |pixels| {
        pixels.map_pixels(|_, _, argb| f(Color::from_argb(argb)).to_argb());
    })
}
