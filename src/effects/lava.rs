use serde::{Deserialize, Serialize};

use super::{apply_glow, AnimatedEffect};
use crate::color::Color;
use crate::noise::{noise_to_color, turbulence_2d};
use crate::texture::TextureHandle;

/// Scrolling, pulsing molten rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LavaParams {
    pub base_color: Color,
    pub hot_color: Color,
    pub scroll_speed_u: f32,
    pub scroll_speed_v: f32,
    pub noise_scale: f32,
    pub glow_intensity: f32,
    pub pulse_frequency: f32,
    pub time: f32,
}

impl Default for LavaParams {
    fn default() -> Self {
        Self {
            base_color: Color::rgb(255, 100, 0),
            hot_color: Color::rgb(255, 255, 100),
            scroll_speed_u: 0.1,
            scroll_speed_v: 0.05,
            noise_scale: 2.0,
            glow_intensity: 2.0,
            pulse_frequency: 1.0,
            time: 0.0,
        }
    }
}

impl AnimatedEffect for LavaParams {
    fn label(&self) -> &'static str {
        "Lava"
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    fn shade(&self, u: f32, v: f32) -> Color {
        let t = self.time;
        let anim_x = u + self.scroll_speed_u * t;
        let anim_y = v + self.scroll_speed_v * t;

        let pulse = (t * self.pulse_frequency).sin() * 0.1 + 0.9;
        let flow = (anim_y * 8.0 + t * 3.0).sin() * 0.1;
        let heat = (turbulence_2d(anim_x, anim_y, self.noise_scale, 4) * pulse + flow).clamp(0.0, 1.0);

        let color = noise_to_color(heat, self.base_color, self.hot_color);
        if heat > 0.7 {
            // Hottest 30% glows proportionally
            apply_glow(color, self.glow_intensity * (heat - 0.7) / 0.3)
        } else {
            color
        }
    }
}

/// Render one frame of lava into `target`
pub fn update_lava_texture(target: &TextureHandle, params: &LavaParams) -> bool {
    params.render(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lava_is_opaque_and_between_base_and_glow() {
        let params = LavaParams::default().with_time(0.7);
        for i in 0..64 {
            let c = params.shade(i as f32 / 64.0, (i * 7 % 64) as f32 / 64.0);
            assert_eq!(c.a, 255);
            assert_eq!(c.r, 255);
            assert!(c.g >= 100);
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: LavaParams = serde_json::from_str(r##"{"noise_scale": 4.0, "hot_color": "#FFC832"}"##).unwrap();
        assert_eq!(params.noise_scale, 4.0);
        assert_eq!(params.hot_color, Color::rgb(255, 200, 50));
        assert_eq!(params.scroll_speed_u, 0.1);
    }
}
