//! Color math
//!
//! Packed `0xAARRGGBB` colors, interpolation, blend modes and color space
//! conversions shared by the generators and post effects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Color
// ============================================================================

/// 8-bit-per-channel ARGB color.
///
/// Serializes as `"#RRGGBB"` when fully opaque, `"#AARRGGBB"` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::argb(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    /// Unpack a `0xAARRGGBB` word
    #[inline]
    pub const fn from_argb(packed: u32) -> Self {
        Self {
            a: (packed >> 24) as u8,
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` word
    #[inline]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Rec.601 luma in [0, 1]
    pub fn luminance(self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    /// Channels as floats in [0, 1], (r, g, b)
    #[inline]
    pub fn rgb_f32(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Build from float channels in [0, 1]; values are clamped and rounded
    pub fn from_rgb_f32(a: u8, r: f32, g: f32, b: f32) -> Self {
        Self::argb(a, unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
    }

    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self::from_argb(packed)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_argb()
    }
}

#[inline]
fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ============================================================================
// Text form
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("color must start with '#'")]
    MissingHash,
    #[error("color must have 6 or 8 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digits in color")]
    BadDigit,
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').ok_or(ParseColorError::MissingHash)?;
        let value = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError::BadDigit)?;
        match hex.len() {
            6 => Ok(Self::from_argb(0xFF00_0000 | value)),
            8 => Ok(Self::from_argb(value)),
            n => Err(ParseColorError::BadLength(n)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// ============================================================================
// Interpolation and blending
// ============================================================================

/// Per-channel linear interpolation, alpha included. `t` is clamped to [0, 1]
/// and channels truncate toward zero.
#[inline]
pub fn lerp_color(c1: Color, c2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    Color {
        a: mix(c1.a, c2.a),
        r: mix(c1.r, c2.r),
        g: mix(c1.g, c2.g),
        b: mix(c1.b, c2.b),
    }
}

/// Alias of [`lerp_color`] under its blending name
#[inline]
pub fn blend_colors(c1: Color, c2: Color, blend: f32) -> Color {
    lerp_color(c1, c2, blend)
}

fn per_channel(c1: Color, c2: Color, op: impl Fn(u16, u16) -> u16) -> Color {
    let f = |a: u8, b: u8| op(a as u16, b as u16).min(255) as u8;
    Color {
        a: f(c1.a, c2.a),
        r: f(c1.r, c2.r),
        g: f(c1.g, c2.g),
        b: f(c1.b, c2.b),
    }
}

/// `a * b / 255` per channel
pub fn multiply_colors(c1: Color, c2: Color) -> Color {
    per_channel(c1, c2, |a, b| a * b / 255)
}

/// Saturating add per channel
pub fn add_colors(c1: Color, c2: Color) -> Color {
    per_channel(c1, c2, |a, b| a + b)
}

/// Saturating subtract per channel
pub fn subtract_colors(c1: Color, c2: Color) -> Color {
    per_channel(c1, c2, u16::saturating_sub)
}

/// `255 - (255 - a)(255 - b) / 255` per channel
pub fn screen_colors(c1: Color, c2: Color) -> Color {
    per_channel(c1, c2, |a, b| 255 - (255 - a) * (255 - b) / 255)
}

// ============================================================================
// HSV / HSL
// ============================================================================

/// Hue in degrees [0, 360), saturation and value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Hue in degrees [0, 360), saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Hue shared by HSV and HSL for the given max/min channel
fn hue(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    h.rem_euclid(360.0)
}

/// Chroma/hue-prime to unshifted rgb
fn hue_sector(h: f32, c: f32) -> (f32, f32, f32) {
    let h = h.rem_euclid(360.0);
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    }
}

pub fn rgb_to_hsv(color: Color) -> Hsv {
    let (r, g, b) = color.rgb_f32();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    Hsv {
        h: hue(r, g, b, max, delta),
        s: if max == 0.0 { 0.0 } else { delta / max },
        v: max,
    }
}

/// Convert back to an opaque color
pub fn hsv_to_rgb(hsv: Hsv) -> Color {
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);
    let c = v * s;
    let m = v - c;
    let (r, g, b) = hue_sector(hsv.h, c);
    Color::from_rgb_f32(255, r + m, g + m, b + m)
}

pub fn rgb_to_hsl(color: Color) -> Hsl {
    let (r, g, b) = color.rgb_f32();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) * 0.5;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    Hsl {
        h: hue(r, g, b, max, delta),
        s,
        l,
    }
}

/// Convert back to an opaque color
pub fn hsl_to_rgb(hsl: Hsl) -> Color {
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - c * 0.5;
    let (r, g, b) = hue_sector(hsl.h, c);
    Color::from_rgb_f32(255, r + m, g + m, b + m)
}

// ============================================================================
// Luminance, gamma, sRGB
// ============================================================================

#[inline]
pub fn luminance(color: Color) -> f32 {
    color.luminance()
}

fn map_rgb(color: Color, f: impl Fn(f32) -> f32) -> Color {
    let (r, g, b) = color.rgb_f32();
    Color::from_rgb_f32(color.a, f(r), f(g), f(b))
}

/// `channel^(1/gamma)`; gamma <= 0 leaves the color unchanged
pub fn adjust_gamma(color: Color, gamma: f32) -> Color {
    if gamma <= 0.0 {
        return color;
    }
    let inv = 1.0 / gamma;
    map_rgb(color, |c| c.powf(inv))
}

/// Encode linear channels with the sRGB transfer curve
pub fn linear_to_srgb(color: Color) -> Color {
    map_rgb(color, |c| {
        if c <= 0.003_130_8 {
            c * 12.92
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        }
    })
}

/// Decode sRGB channels to linear
pub fn srgb_to_linear(color: Color) -> Color {
    map_rgb(color, |c| {
        if c <= 0.040_45 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    })
}
