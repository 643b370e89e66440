//! Texture sampling with UV coordinates
//!
//! Nearest and bilinear lookups over a [`PixelBuffer`], used by the
//! distortion filters that resample a snapshot through a UV mapping.

use super::PixelBuffer;
use crate::color::{lerp_color, Color};

/// How out-of-range UV coordinates are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Tile: u = 1.25 samples the same texel as u = 0.25
    #[default]
    Wrap,
    /// Clamp to the edge texel
    Clamp,
}

/// Wrap a UV pair into [0, 1) using rem_euclid for correct negative handling
#[inline]
pub fn wrap_uv(u: f32, v: f32) -> (f32, f32) {
    (u.rem_euclid(1.0), v.rem_euclid(1.0))
}

/// Clamp a UV pair into [0, 1]
#[inline]
pub fn clamp_uv(u: f32, v: f32) -> (f32, f32) {
    (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
}

/// True when both coordinates lie inside [0, 1]
#[inline]
pub fn is_valid_uv(u: f32, v: f32) -> bool {
    (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)
}

impl PixelBuffer {
    /// Nearest-neighbour sample
    pub fn sample_nearest(&self, u: f32, v: f32, mode: AddressMode) -> u32 {
        let w = self.width();
        let h = self.height();
        let (x, y) = match mode {
            AddressMode::Wrap => {
                let (u, v) = wrap_uv(u, v);
                ((u * w as f32) as u32 % w, (v * h as f32) as u32 % h)
            },
            AddressMode::Clamp => {
                let (u, v) = clamp_uv(u, v);
                (
                    ((u * w as f32) as u32).min(w - 1),
                    ((v * h as f32) as u32).min(h - 1),
                )
            },
        };
        self.get_clamped(x as i32, y as i32)
    }

    /// Bilinear sample, all four channels interpolated
    pub fn sample_bilinear(&self, u: f32, v: f32, mode: AddressMode) -> u32 {
        let w = self.width();
        let h = self.height();

        let (fx, fy, x0, y0, x1, y1) = match mode {
            AddressMode::Wrap => {
                let (u, v) = wrap_uv(u, v);
                let x = u * w as f32;
                let y = v * h as f32;
                let x0 = x.floor() as u32 % w;
                let y0 = y.floor() as u32 % h;
                (x.fract(), y.fract(), x0, y0, (x0 + 1) % w, (y0 + 1) % h)
            },
            AddressMode::Clamp => {
                // Same texel mapping as Wrap, pinned to the last texel
                let (u, v) = clamp_uv(u, v);
                let x = (u * w as f32).min((w - 1) as f32);
                let y = (v * h as f32).min((h - 1) as f32);
                let x0 = x.floor() as u32;
                let y0 = y.floor() as u32;
                (
                    x - x0 as f32,
                    y - y0 as f32,
                    x0,
                    y0,
                    (x0 + 1).min(w - 1),
                    (y0 + 1).min(h - 1),
                )
            },
        };

        let texel = |x: u32, y: u32| Color::from_argb(self.get_clamped(x as i32, y as i32));
        let top = lerp_color(texel(x0, y0), texel(x1, y0), fx);
        let bottom = lerp_color(texel(x0, y1), texel(x1, y1), fx);
        lerp_color(top, bottom, fy).to_argb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> PixelBuffer {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.set(0, 0, 0xFF00_0000);
        buf.set(1, 0, 0xFFFF_FFFF);
        buf.set(0, 1, 0xFFFF_0000);
        buf.set(1, 1, 0xFF00_00FF);
        buf
    }

    #[test]
    fn nearest_wraps_negative_coordinates() {
        let buf = two_by_two();
        assert_eq!(buf.sample_nearest(-0.25, 0.0, AddressMode::Wrap), 0xFFFF_FFFF);
        assert_eq!(buf.sample_nearest(1.25, 0.75, AddressMode::Wrap), 0xFFFF_0000);
    }

    #[test]
    fn nearest_clamps_to_edges() {
        let buf = two_by_two();
        assert_eq!(buf.sample_nearest(5.0, 5.0, AddressMode::Clamp), 0xFF00_00FF);
        assert_eq!(buf.sample_nearest(-5.0, 0.0, AddressMode::Clamp), 0xFF00_0000);
    }

    #[test]
    fn bilinear_hits_corners_exactly_when_clamped() {
        let buf = two_by_two();
        assert_eq!(buf.sample_bilinear(0.0, 0.0, AddressMode::Clamp), 0xFF00_0000);
        assert_eq!(buf.sample_bilinear(1.0, 1.0, AddressMode::Clamp), 0xFF00_00FF);
    }

    #[test]
    fn bilinear_blends_between_texels() {
        let buf = two_by_two();
        let mid = Color::from_argb(buf.sample_bilinear(0.25, 0.0, AddressMode::Clamp));
        assert_eq!(mid.a, 255);
        assert!((126..=128).contains(&mid.r));
    }

    #[test]
    fn uv_helpers() {
        assert!(is_valid_uv(0.0, 1.0));
        assert!(!is_valid_uv(-0.1, 0.5));
        assert_eq!(clamp_uv(2.0, -1.0), (1.0, 0.0));
        let (u, v) = wrap_uv(-0.25, 1.5);
        assert!((u - 0.75).abs() < 1e-6 && (v - 0.5).abs() < 1e-6);
    }
}
