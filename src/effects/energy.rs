use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::AnimatedEffect;
use crate::color::Color;
use crate::noise::{noise_to_color, perlin_2d};
use crate::texture::TextureHandle;

/// Pulsing concentric rings fading out from the center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyParams {
    pub core_color: Color,
    pub edge_color: Color,
    pub pulse_speed: f32,
    pub ring_count: f32,
    pub distortion: f32,
    pub intensity: f32,
    pub time: f32,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            core_color: Color::rgb(255, 255, 255),
            edge_color: Color::rgb(0, 255, 255),
            pulse_speed: 2.0,
            ring_count: 5.0,
            distortion: 0.2,
            intensity: 1.0,
            time: 0.0,
        }
    }
}

impl AnimatedEffect for EnergyParams {
    fn label(&self) -> &'static str {
        "Energy"
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn shade(&self, u: f32, v: f32) -> Color {
        let t = self.time;
        let dist = (u - 0.5).hypot(v - 0.5);

        let ring = (dist * self.ring_count * TAU + t * self.pulse_speed).sin() * 0.5 + 0.5
            + perlin_2d(u * 4.0 + t, v * 4.0 + t, 2.0, 3, 0.5) * self.distortion;
        let energy = (ring * self.intensity * (1.0 - dist)).clamp(0.0, 1.0);

        if energy > 0.5 {
            noise_to_color((energy - 0.5) / 0.5, self.edge_color, self.core_color)
        } else if energy > 0.1 {
            noise_to_color((energy - 0.1) / 0.4, Color::TRANSPARENT, self.edge_color)
        } else {
            Color::TRANSPARENT
        }
    }
}

/// Render one frame of the energy field into `target`
pub fn update_energy_texture(target: &TextureHandle, params: &EnergyParams) -> bool {
    params.render(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bright_center_when_ring_peaks() {
        // At t = 0 the ring term at the center is sin(0) * 0.5 + 0.5 = 0.5,
        // doubled by the intensity to a fully saturated core
        let params = EnergyParams {
            distortion: 0.0,
            intensity: 2.0,
            ..EnergyParams::default()
        };
        let c = params.shade(0.5, 0.5);
        assert_eq!(c, params.core_color);
    }

    #[test]
    fn zero_intensity_is_transparent() {
        let params = EnergyParams {
            intensity: 0.0,
            ..EnergyParams::default()
        };
        assert_eq!(params.shade(0.2, 0.8), Color::TRANSPARENT);
    }
}
