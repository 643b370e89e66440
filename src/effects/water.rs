use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::{apply_glow, AnimatedEffect};
use crate::color::Color;
use crate::noise::{noise_to_color, perlin_2d, threshold_noise, voronoi_2d};
use crate::texture::TextureHandle;

/// Rolling water surface with foam crests and caustic highlights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    pub shallow_color: Color,
    pub deep_color: Color,
    pub foam_color: Color,
    pub wave_speed: f32,
    pub wave_scale: f32,
    pub foam_amount: f32,
    pub caustic_strength: f32,
    pub time: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            shallow_color: Color::rgb(0, 150, 255),
            deep_color: Color::rgb(0, 50, 150),
            foam_color: Color::rgb(255, 255, 255),
            wave_speed: 1.0,
            wave_scale: 4.0,
            foam_amount: 0.3,
            caustic_strength: 0.5,
            time: 0.0,
        }
    }
}

/// Two crossing sine trains, result in [-1, 1]
fn wave_height(x: f32, y: f32, time: f32, speed: f32, scale: f32) -> f32 {
    let a = ((x * scale + time * speed) * TAU).sin();
    let b = ((y * scale * 1.3 + time * speed * 0.7) * TAU).cos();
    (a + b) * 0.5
}

impl AnimatedEffect for WaterParams {
    fn label(&self) -> &'static str {
        "Water"
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn shade(&self, u: f32, v: f32) -> Color {
        let t = self.time;
        let w1 = wave_height(u, v, t, self.wave_speed, self.wave_scale);
        let w2 = wave_height(
            u * 1.3,
            v * 0.7,
            t * 1.2,
            self.wave_speed * 0.8,
            self.wave_scale * 1.5,
        );
        let waves = (w1 + w2) * 0.5;

        let depth = perlin_2d(u, v, 2.0, 3, 0.5) * 0.3 + 0.7;
        let level = (depth + waves * 0.2).clamp(0.0, 1.0);
        let mut color = noise_to_color(level, self.deep_color, self.shallow_color);

        if waves > 0.8 {
            let foam = (waves - 0.8) / 0.2 * self.foam_amount;
            color = noise_to_color(foam, color, self.foam_color);
        }

        if self.caustic_strength > 0.0 {
            let cells = voronoi_2d(u + t * 0.1, v + t * 0.15, 8.0);
            let caustics = threshold_noise(cells, 0.2, 0.1) * self.caustic_strength;
            if caustics > 0.0 {
                color = apply_glow(color, caustics);
            }
        }
        color
    }
}

/// Render one frame of water into `target`
pub fn update_water_texture(target: &TextureHandle, params: &WaterParams) -> bool {
    params.render(target)
}
