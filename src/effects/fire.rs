use serde::{Deserialize, Serialize};

use super::{apply_glow, AnimatedEffect};
use crate::color::Color;
use crate::noise::{noise_to_color, turbulence_2d};
use crate::texture::TextureHandle;

/// Flickering flame rising from the bottom edge, fading to smoke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireParams {
    pub inner_color: Color,
    pub outer_color: Color,
    pub smoke_color: Color,
    pub flame_height: f32,
    pub intensity: f32,
    pub turbulence: f32,
    pub wind_strength: f32,
    pub time: f32,
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            inner_color: Color::rgb(255, 255, 100),
            outer_color: Color::rgb(255, 50, 0),
            smoke_color: Color::rgb(64, 64, 64),
            flame_height: 1.0,
            intensity: 1.0,
            turbulence: 2.0,
            wind_strength: 0.1,
            time: 0.0,
        }
    }
}

/// Tapered flame envelope. `x` across, `y` up from the base, both in [0, 1].
/// Widest at the base (with a slow breathing wobble), narrowing to a tip.
fn flame_shape(x: f32, y: f32, height: f32, time: f32) -> f32 {
    let base_width = 0.3 + (time * 3.0).sin() * 0.1;
    let top_width = 0.05;
    let width = base_width + (top_width - base_width) * y;
    let from_center = (x - 0.5).abs();
    if from_center > width {
        return 0.0;
    }
    (1.0 - y) * height * (1.0 - from_center / width)
}

impl AnimatedEffect for FireParams {
    fn label(&self) -> &'static str {
        "Fire"
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn shade(&self, u: f32, v: f32) -> Color {
        let t = self.time;
        let shape = flame_shape(u, 1.0 - v, self.flame_height, t);
        let turb = turbulence_2d(
            u + self.wind_strength * (t * 2.0).sin(),
            v - t * 0.5,
            self.turbulence,
            4,
        );
        let heat = (shape * turb * self.intensity).clamp(0.0, 1.0);

        if heat > 0.1 {
            let color = noise_to_color((heat - 0.1) / 0.9, self.outer_color, self.inner_color);
            if heat > 0.7 {
                apply_glow(color, (heat - 0.7) / 0.3 * 0.5)
            } else {
                color
            }
        } else {
            // Faint heat reads as smoke
            noise_to_color(heat * 10.0, Color::TRANSPARENT, self.smoke_color)
        }
    }
}

/// Render one frame of fire into `target`
pub fn update_fire_texture(target: &TextureHandle, params: &FireParams) -> bool {
    params.render(target)
}
