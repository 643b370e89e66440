use serde::{Deserialize, Serialize};

use super::AnimatedEffect;
use crate::color::Color;
use crate::noise::noise_to_color;
use crate::texture::TextureHandle;

/// Spiral arms twisting tighter over time around a movable center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwirlParams {
    pub center_color: Color,
    pub outer_color: Color,
    pub rotation_speed: f32,
    pub swirl_strength: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub time: f32,
}

impl Default for SwirlParams {
    fn default() -> Self {
        Self {
            center_color: Color::rgb(255, 255, 255),
            outer_color: Color::rgb(0, 0, 0),
            rotation_speed: 1.0,
            swirl_strength: 2.0,
            center_x: 0.5,
            center_y: 0.5,
            time: 0.0,
        }
    }
}

impl AnimatedEffect for SwirlParams {
    fn label(&self) -> &'static str {
        "Swirl"
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn shade(&self, u: f32, v: f32) -> Color {
        let t = self.time;
        let dx = u - self.center_x;
        let dy = v - self.center_y;
        let dist = dx.hypot(dy);

        let angle = dy.atan2(dx) + self.swirl_strength * (1.0 - dist) * t;
        let spiral = (dist * 8.0 + angle + t * self.rotation_speed).sin() * 0.5 + 0.5;
        let intensity = (spiral * (1.0 - dist)).clamp(0.0, 1.0);

        if intensity > 0.3 {
            noise_to_color((intensity - 0.3) / 0.7, self.outer_color, self.center_color)
        } else {
            noise_to_color(intensity / 0.3, Color::TRANSPARENT, self.outer_color)
        }
    }
}

/// Render one frame of the swirl into `target`
pub fn update_swirl_texture(target: &TextureHandle, params: &SwirlParams) -> bool {
    params.render(target)
}
