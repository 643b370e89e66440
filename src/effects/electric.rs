use serde::{Deserialize, Serialize};

use super::{apply_glow, AnimatedEffect};
use crate::color::Color;
use crate::noise::{noise_to_color, ridge_2d};
use crate::texture::TextureHandle;

/// Flickering ridge-noise bolts over a transparent background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricParams {
    pub bolt_color: Color,
    pub glow_color: Color,
    pub bolt_frequency: f32,
    pub glow_radius: f32,
    pub intensity: f32,
    pub flicker_speed: f32,
    pub time: f32,
}

impl Default for ElectricParams {
    fn default() -> Self {
        Self {
            bolt_color: Color::rgb(200, 200, 255),
            glow_color: Color::rgb(100, 100, 255),
            bolt_frequency: 8.0,
            glow_radius: 0.1,
            intensity: 1.0,
            flicker_speed: 10.0,
            time: 0.0,
        }
    }
}

impl AnimatedEffect for ElectricParams {
    fn label(&self) -> &'static str {
        "Electric"
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn shade(&self, u: f32, v: f32) -> Color {
        let t = self.time;
        let flicker = (t * self.flicker_speed).sin() * 0.3 + 0.7;
        let bolt = ridge_2d(u + t * 0.1, v, self.bolt_frequency, 2) * flicker;

        let glow = if self.glow_radius > 0.0 {
            let g = 1.0 - (bolt / self.glow_radius).min(1.0);
            g * g
        } else {
            0.0
        };
        let charge = (bolt.max(glow * 0.3) * self.intensity).clamp(0.0, 1.0);

        if charge > 0.8 {
            apply_glow(self.bolt_color, (charge - 0.8) / 0.2)
        } else if charge > 0.2 {
            noise_to_color((charge - 0.2) / 0.6, Color::TRANSPARENT, self.glow_color)
        } else {
            Color::TRANSPARENT
        }
    }
}

/// Render one frame of electricity into `target`
pub fn update_electric_texture(target: &TextureHandle, params: &ElectricParams) -> bool {
    params.render(target)
}
