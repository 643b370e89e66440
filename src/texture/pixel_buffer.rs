use crate::error::TextureError;

// ============================================================================
// PixelBuffer
// ============================================================================

/// Row-major 32-bit pixel storage, one `0xAARRGGBB` word per pixel.
///
/// Rows are `pitch` pixels apart, which may be more than `width` when the
/// owner pads rows for alignment. Every address computation goes through
/// [`PixelBuffer::index`], so padding pixels are never visited by the
/// generators or filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    pitch: u32,
}

impl PixelBuffer {
    /// Create a tightly packed buffer (pitch == width), cleared to transparent black
    pub fn new(width: u32, height: u32) -> Result<Self, TextureError> {
        Self::with_pitch(width, height, width)
    }

    /// Create a buffer whose rows are `pitch` pixels apart
    pub fn with_pitch(width: u32, height: u32, pitch: u32) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroDimension { width, height });
        }
        if pitch < width {
            return Err(TextureError::PitchTooSmall { width, pitch });
        }
        Ok(Self {
            pixels: vec![0; pitch as usize * height as usize],
            width,
            height,
            pitch,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in pixels
    #[inline]
    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    /// Offset of pixel (x, y) in the backing store
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.pitch as usize + x as usize
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Write a pixel (bounds checked, out-of-range writes are dropped)
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, argb: u32) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = argb;
        }
    }

    /// Read a pixel with coordinates clamped to the nearest edge
    #[inline]
    pub fn get_clamped(&self, x: i32, y: i32) -> u32 {
        let cx = x.clamp(0, self.width as i32 - 1) as u32;
        let cy = y.clamp(0, self.height as i32 - 1) as u32;
        self.pixels[self.index(cx, cy)]
    }

    /// The visible part of row `y` (padding excluded)
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable visible part of row `y` (padding excluded)
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = self.index(0, y);
        let end = start + self.width as usize;
        &mut self.pixels[start..end]
    }

    /// Fill every visible pixel with one value
    pub fn fill(&mut self, argb: u32) {
        for y in 0..self.height {
            self.row_mut(y).fill(argb);
        }
    }

    /// Copy of the visible pixels, tightly packed (`width * height` entries).
    ///
    /// Filters read neighbours from this copy so that they never observe a
    /// pixel already rewritten earlier in the same pass.
    pub fn snapshot(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }

    /// Visit every visible pixel exactly once in row-major order.
    /// `f(x, y, current)` returns the new pixel value.
    pub fn map_pixels(&mut self, mut f: impl FnMut(u32, u32, u32) -> u32) {
        for y in 0..self.height {
            let row = self.row_mut(y);
            for (x, px) in row.iter_mut().enumerate() {
                *px = f(x as u32, y, *px);
            }
        }
    }

    /// Visit every visible pixel with normalized coordinates `(x / width, y / height)`.
    /// `shade(u, v)` returns the new pixel value.
    pub fn shade_uv(&mut self, mut shade: impl FnMut(f32, f32) -> u32) {
        let w = self.width as f32;
        let h = self.height as f32;
        self.map_pixels(|x, y, _| shade(x as f32 / w, y as f32 / h));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_dimensions() {
        assert_eq!(
            PixelBuffer::new(0, 4),
            Err(TextureError::ZeroDimension {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            PixelBuffer::with_pitch(8, 4, 6),
            Err(TextureError::PitchTooSmall { width: 8, pitch: 6 })
        );
    }

    #[test]
    fn pitch_padding_is_never_touched() {
        let mut buf = PixelBuffer::with_pitch(3, 2, 5).unwrap();
        buf.fill(0xFF00_00FF);
        // Padding columns stay zero
        assert_eq!(buf.pixels[3], 0);
        assert_eq!(buf.pixels[4], 0);
        assert_eq!(buf.pixels[8], 0);
        assert_eq!(buf.get(2, 1), Some(0xFF00_00FF));
        assert_eq!(buf.get(3, 1), None);
    }

    #[test]
    fn map_pixels_visits_each_pixel_once() {
        let mut buf = PixelBuffer::with_pitch(4, 3, 8).unwrap();
        let mut visits = 0;
        buf.map_pixels(|x, y, px| {
            visits += 1;
            assert_eq!(px, 0);
            y * 4 + x
        });
        assert_eq!(visits, 12);
        assert_eq!(buf.snapshot(), (0..12).collect::<Vec<u32>>());
    }

    #[test]
    fn get_clamped_uses_edge_pixels() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.set(0, 0, 1);
        buf.set(1, 1, 4);
        assert_eq!(buf.get_clamped(-5, -5), 1);
        assert_eq!(buf.get_clamped(9, 9), 4);
    }

    #[test]
    fn shade_uv_uses_width_and_height() {
        let mut buf = PixelBuffer::new(4, 2).unwrap();
        buf.shade_uv(|u, v| ((u * 4.0) as u32) | (((v * 2.0) as u32) << 8));
        assert_eq!(buf.get(3, 1), Some(3 | (1 << 8)));
    }
}
