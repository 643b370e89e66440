//! Texture storage: pitched pixel buffers, shared lockable handles and sampling

mod handle;
mod pixel_buffer;
mod sampling;

pub use handle::{LockedPixels, TextureHandle, TextureId};
pub use pixel_buffer::PixelBuffer;
pub use sampling::{clamp_uv, is_valid_uv, wrap_uv, AddressMode};

use tracing::trace;

/// Lock `target`, run `f` over its pixels, unlock.
///
/// A texture that cannot be locked (busy or released) is skipped without
/// touching any pixel; the return value tells whether `f` ran.
pub fn with_locked(target: &TextureHandle, f: impl FnOnce(&mut PixelBuffer)) -> bool {
    match target.try_lock() {
        Ok(mut pixels) => {
            f(&mut pixels);
            true
        },
        Err(err) => {
            trace!(texture = ?target.id(), %err, "skipping texture");
            false
        },
    }
}

/// Lock `target` and write `shade(u, v)` into every pixel, where
/// `(u, v) = (x / width, y / height)`.
pub fn shade_uv(target: &TextureHandle, shade: impl FnMut(f32, f32) -> u32) -> bool {
    with_locked(target, |pixels| pixels.shade_uv(shade))
}
