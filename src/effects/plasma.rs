use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use super::AnimatedEffect;
use crate::color::{lerp_color, Color};
use crate::texture::TextureHandle;

/// How the plasma field is turned into color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlasmaPalette {
    /// Phase-shifted sine per channel, cycling with time
    #[default]
    Cosine,
    /// Piecewise blend color1 -> color2 -> color3
    Colors,
}

/// Three interfering sine waves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasmaParams {
    pub color1: Color,
    pub color2: Color,
    pub color3: Color,
    pub frequency1: f32,
    pub frequency2: f32,
    pub frequency3: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub palette: PlasmaPalette,
    pub time: f32,
}

impl Default for PlasmaParams {
    fn default() -> Self {
        Self {
            color1: Color::rgb(255, 0, 255),
            color2: Color::rgb(0, 255, 255),
            color3: Color::rgb(255, 255, 0),
            frequency1: 2.0,
            frequency2: 3.0,
            frequency3: 4.0,
            speed: 1.0,
            amplitude: 1.0,
            palette: PlasmaPalette::Cosine,
            time: 0.0,
        }
    }
}

impl PlasmaParams {
    /// Plasma field in [0, 1] for amplitudes up to 1
    fn field(&self, u: f32, v: f32) -> f32 {
        let phase = self.time * self.speed;
        let w1 = ((u * self.frequency1 + phase) * TAU).sin();
        let w2 = ((v * self.frequency2 + phase * 0.8) * TAU).cos();
        let w3 = (((u + v) * self.frequency3 + phase * 1.2) * TAU).sin();
        (w1 + w2 + w3) * self.amplitude / 3.0 * 0.5 + 0.5
    }
}

impl AnimatedEffect for PlasmaParams {
    fn label(&self) -> &'static str {
        "Plasma"
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn shade(&self, u: f32, v: f32) -> Color {
        let plasma = self.field(u, v);
        match self.palette {
            PlasmaPalette::Cosine => {
                let base = plasma * PI + self.time * self.speed;
                let channel = |offset: f32| (((base + offset).sin() * 0.5 + 0.5) * 255.0) as u8;
                Color::rgb(channel(0.0), channel(2.0), channel(4.0))
            },
            PlasmaPalette::Colors => {
                let p = plasma.clamp(0.0, 1.0);
                let c = if p < 0.5 {
                    lerp_color(self.color1, self.color2, p * 2.0)
                } else {
                    lerp_color(self.color2, self.color3, (p - 0.5) * 2.0)
                };
                c.with_alpha(255)
            },
        }
    }
}

/// Render one frame of plasma into `target`
pub fn update_plasma_texture(target: &TextureHandle, params: &PlasmaParams) -> bool {
    params.render(target)
}
