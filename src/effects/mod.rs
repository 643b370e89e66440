//! Animated texture effects
//!
//! Each effect is a plain parameter record with a `time` field. Rendering
//! is a pure function of the record: the same parameters always produce the
//! same pixels, and nothing is carried between calls. The scheduler keeps a
//! copy of the record per registered texture and stamps the current time
//! into it before every render.

mod electric;
mod energy;
mod fire;
mod lava;
mod plasma;
pub mod presets;
mod swirl;
mod water;

pub use electric::{update_electric_texture, ElectricParams};
pub use energy::{update_energy_texture, EnergyParams};
pub use fire::{update_fire_texture, FireParams};
pub use lava::{update_lava_texture, LavaParams};
pub use plasma::{update_plasma_texture, PlasmaPalette, PlasmaParams};
pub use swirl::{update_swirl_texture, SwirlParams};
pub use water::{update_water_texture, WaterParams};

use crate::color::Color;
use crate::texture::{shade_uv, TextureHandle};

/// Trait for all time-driven texture effects
pub trait AnimatedEffect: Clone + 'static {
    /// Registry label ("Lava", "Water", ...)
    fn label(&self) -> &'static str;

    /// Overwrite the animation time
    fn set_time(&mut self, time: f32);

    /// Color at normalized coordinates `(u, v) = (x / width, y / height)`
    fn shade(&self, u: f32, v: f32) -> Color;

    /// Copy of these parameters at another point in time
    fn with_time(&self, time: f32) -> Self {
        let mut next = self.clone();
        next.set_time(time);
        next
    }

    /// Rewrite every pixel of `target`. Returns false without touching the
    /// texture when it cannot be locked.
    fn render(&self, target: &TextureHandle) -> bool {
        shade_uv(target, |u, v| self.shade(u, v).to_argb())
    }
}

/// Brighten a color multiplicatively: each channel is scaled by `1 + glow`
/// and capped at 255. `glow` is clamped to [0, 2]; alpha is kept.
pub fn apply_glow(color: Color, glow: f32) -> Color {
    let factor = 1.0 + glow.clamp(0.0, 2.0);
    let boost = |c: u8| (c as f32 * factor).min(255.0) as u8;
    Color::argb(color.a, boost(color.r), boost(color.g), boost(color.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_scales_and_caps() {
        let c = Color::argb(90, 100, 50, 200);
        assert_eq!(apply_glow(c, 0.0), c);
        assert_eq!(apply_glow(c, 1.0), Color::argb(90, 200, 100, 255));
        // Intensity above 2 is clamped
        assert_eq!(apply_glow(c, 10.0), apply_glow(c, 2.0));
        assert_eq!(apply_glow(c, -1.0), c);
    }

    #[test]
    fn with_time_leaves_original_untouched() {
        let base = LavaParams::default();
        let later = base.with_time(3.5);
        assert_eq!(base.time, 0.0);
        assert_eq!(later.time, 3.5);
        assert_eq!(later.label(), "Lava");
    }

    #[test]
    fn every_effect_is_deterministic_in_time() {
        fn check<E: AnimatedEffect>(effect: &E) {
            let a = TextureHandle::new(16, 12).unwrap();
            let b = TextureHandle::new(16, 12).unwrap();
            assert!(effect.with_time(1.25).render(&a));
            assert!(effect.with_time(1.25).render(&b));
            assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap(), "{}", effect.label());

            // A different time changes the picture
            assert!(effect.with_time(2.0).render(&b));
            assert_ne!(a.snapshot().unwrap(), b.snapshot().unwrap(), "{}", effect.label());
        }
        check(&LavaParams::default());
        check(&WaterParams::default());
        check(&FireParams::default());
        check(&PlasmaParams::default());
        check(&ElectricParams::default());
        check(&EnergyParams::default());
        check(&SwirlParams::default());
    }

    #[test]
    fn render_skips_locked_texture() {
        let tex = TextureHandle::new(4, 4).unwrap();
        let guard = tex.try_lock().unwrap();
        assert!(!PlasmaParams::default().render(&tex));
        drop(guard);
        assert!(tex.snapshot().unwrap().iter().all(|&p| p == 0));
    }

    #[test]
    fn render_respects_pitch() {
        let tex = TextureHandle::with_pitch(5, 3, 8).unwrap();
        assert!(PlasmaParams::default().render(&tex));
        // Plasma is always opaque: every visible pixel got written
        assert!(tex.snapshot().unwrap().iter().all(|&p| p >> 24 == 0xFF));
    }
}
